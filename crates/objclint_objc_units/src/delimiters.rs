use objclint_objc_lexer::{TokenKind, Tokens};

/// Pairs every bracketing token with its partner.
///
/// Built in one left-to-right pass. A closer pairs with the nearest open
/// delimiter of its own type; openers skipped over that way are unclosed.
/// A closer with no opener of its type is unmatched.
#[derive(Debug, Clone, Default)]
pub struct DelimiterTable {
    partners: Vec<Option<usize>>,
    unclosed: Vec<usize>,
    unmatched: Vec<usize>,
}

impl DelimiterTable {
    pub fn build(tokens: &Tokens) -> Self {
        let mut table = Self {
            partners: vec![None; tokens.len()],
            ..Self::default()
        };
        let mut stack: Vec<usize> = Vec::new();

        for (index, token) in tokens.iter().enumerate() {
            if token.kind() != TokenKind::Punctuation {
                continue;
            }
            let text = token.text();
            if closer_for(text).is_some() {
                stack.push(index);
                continue;
            }
            if !matches!(text, ")" | "]" | "}") {
                continue;
            }

            let position = stack
                .iter()
                .rposition(|&open| closer_for(tokens[open].text()) == Some(text));
            match position {
                Some(position) => {
                    let open = stack[position];
                    table.unclosed.extend(stack.drain(position + 1..));
                    stack.truncate(position);
                    table.partners[open] = Some(index);
                    table.partners[index] = Some(open);
                }
                None => table.unmatched.push(index),
            }
        }

        table.unclosed.extend(stack);
        table.unclosed.sort_unstable();
        table
    }

    /// The matching delimiter of `index`, if it has one.
    pub fn partner(&self, index: usize) -> Option<usize> {
        self.partners.get(index).copied().flatten()
    }

    /// Whether `index` is an opener with a matching closer.
    pub fn is_matched_opener(&self, index: usize) -> bool {
        self.partner(index).is_some_and(|partner| partner > index)
    }

    /// Openers that are never closed.
    pub fn unclosed(&self) -> &[usize] {
        &self.unclosed
    }

    /// Closers without an opener.
    pub fn unmatched(&self) -> &[usize] {
        &self.unmatched
    }
}

/// The closing text for an opening delimiter.
pub(crate) fn closer_for(text: &str) -> Option<&'static str> {
    match text {
        "(" | "@(" => Some(")"),
        "[" | "@[" => Some("]"),
        "{" | "@{" => Some("}"),
        _ => None,
    }
}

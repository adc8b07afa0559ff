//! Conflict resolution and application of fixes.

use objclint_diagnostics::Edit;
use objclint_text_size::Ranged;

use crate::Message;

/// Resolve the fixes attached to `messages` into one conflict-free set of
/// edits, sorted by start offset.
///
/// Fixes are accepted in order of rule identifier, then position. A fix that
/// conflicts with an accepted one is removed from its message, which is still
/// reported.
pub fn resolve_fixes(messages: &mut [Message]) -> Vec<Edit> {
    let mut order: Vec<usize> = (0..messages.len())
        .filter(|&index| messages[index].fix.is_some())
        .collect();
    order.sort_by(|&a, &b| {
        let (a_msg, b_msg) = (&messages[a], &messages[b]);
        a_msg
            .rule
            .cmp(b_msg.rule)
            .then_with(|| a_msg.range().start().cmp(&b_msg.range().start()))
            .then_with(|| a.cmp(&b))
    });

    let mut accepted: Vec<Edit> = Vec::new();
    for index in order {
        let message = &mut messages[index];
        let Some(fix) = &message.fix else {
            continue;
        };
        let conflicts = fix
            .edits()
            .iter()
            .any(|edit| accepted.iter().any(|existing| existing.conflicts_with(edit)));
        if conflicts {
            tracing::trace!(
                rule = message.rule,
                offset = u32::from(message.range().start()),
                "dropping conflicting fix"
            );
            message.fix = None;
        } else {
            accepted.extend(fix.edits().iter().cloned());
        }
    }

    accepted.sort();
    accepted
}

/// Apply edits sorted by start offset to `source`. Edits that overlap an
/// earlier edit are skipped.
pub fn apply_edits(source: &str, edits: &[Edit]) -> String {
    let mut output = String::with_capacity(source.len());
    let mut last = 0;

    for edit in edits {
        let start = edit.start().to_usize();
        let end = edit.end().to_usize();
        if start < last {
            tracing::warn!(start, end, "skipping overlapping edit");
            continue;
        }
        output.push_str(&source[last..start]);
        output.push_str(edit.content().unwrap_or(""));
        last = end;
    }

    output.push_str(&source[last..]);
    output
}

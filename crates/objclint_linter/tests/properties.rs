//! Properties that hold for every input: lossless tokenization,
//! deterministic output, non-overlapping edits and idempotent fixes.

use objclint_linter::{LintResult, Linter, LinterSettings, RuleRegistry, apply_edits};
use objclint_objc_lexer::{Token, Tokens};
use objclint_text_size::Ranged;

const HEADER: &str = "\
#import <Foundation/Foundation.h>

@interface Ship : NSObject
@property (nonatomic, copy) NSString* name;
- (void)setVelocity: (Vector *)velocity;
- (void)setA:(int)a
  withB:(int)b;
@end
";

const IMPLEMENTATION: &str = "\
@implementation Ship
-(void)run
{
    if(!_name){
        NSArray *a = @[@\"One\",@\"Two\"];
        [self setValue :a forKey:@\"k\"];
    }
    while ( _x ) {
    }
}
@end
";

const GARBAGE: &str = "}}]) @[ @{ \"open\n - ( ( [ #import < /* never closed";

fn corpus() -> Vec<&'static str> {
    vec![
        "",
        HEADER,
        IMPLEMENTATION,
        GARBAGE,
        "x = @[ @1, @2",
        "- (void)f {\n    [self go:(x];\n",
        "\t\t\r\n#include <stdio.h>\r\nif(x){}\r\n",
    ]
}

fn lint(source: &str, settings: LinterSettings) -> LintResult {
    Linter::new(settings).unwrap().lint_source(source)
}

#[test]
fn tokenization_is_lossless() {
    for source in corpus() {
        let tokens = Tokens::new(source);
        let rebuilt: String = tokens.iter().map(Token::text).collect();
        assert_eq!(rebuilt, source);
    }
}

#[test]
fn lint_is_deterministic() {
    for source in corpus() {
        let settings = LinterSettings::default().with_autofix(true);
        let first = lint(source, settings.clone());
        let second = lint(source, settings);
        assert_eq!(first.messages, second.messages);
        assert_eq!(first.edits, second.edits);
    }
}

#[test]
fn edits_never_overlap() {
    for source in corpus() {
        let result = lint(source, LinterSettings::default().with_autofix(true));
        for pair in result.edits.windows(2) {
            assert!(
                pair[0].end() <= pair[1].start() && pair[0].start() != pair[1].start(),
                "overlapping edits {:?} and {:?} in {source:?}",
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn messages_are_sorted_by_position_and_rule() {
    for source in corpus() {
        let result = lint(source, LinterSettings::default());
        let keys: Vec<_> = result
            .messages
            .iter()
            .map(|message| (message.location().line, message.location().column, message.rule))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}

/// Each rule on its own: one round of fixes leaves nothing for that rule.
#[test]
fn fixes_are_idempotent_per_rule() {
    let registry = RuleRegistry::builtin();
    for source in [HEADER, IMPLEMENTATION] {
        for rule in registry.rule_ids() {
            let settings = LinterSettings::default()
                .only(rule)
                .with_autofix(true)
                .with_unsafe_fixes(true);
            let result = lint(source, settings.clone());
            if result.edits.is_empty() {
                continue;
            }
            let output = apply_edits(source, &result.edits);
            let again = lint(&output, settings);
            let left: Vec<_> = again.by_rule(rule).map(|message| message.body()).collect();
            assert!(
                left.is_empty(),
                "{rule} left {left:?} after fixing:\n{output}"
            );
        }
    }
}

#[test]
fn full_fix_converges() {
    let linter = Linter::new(LinterSettings::default().with_autofix(true)).unwrap();
    for source in [HEADER, IMPLEMENTATION] {
        let fixed = linter.fix_source(source);
        assert!(fixed.remaining.iter().all(|message| message.fix.is_none()));
        let again = linter.fix_source(&fixed.source);
        assert_eq!(again.source, fixed.source);
        assert_eq!(again.applied, 0);
    }
}

#[test]
fn fixes_keep_crlf_line_endings() {
    let linter = Linter::new(LinterSettings::default().with_autofix(true)).unwrap();
    let literal = "- (void)f {\n    x = @[ @1,\n      @2 ];\n}\n";
    for source in [HEADER, IMPLEMENTATION, literal] {
        let source = source.replace('\n', "\r\n");
        let fixed = linter.fix_source(&source);
        assert!(fixed.applied > 0);
        assert!(
            !fixed.source.replace("\r\n", "").contains('\n'),
            "bare line feed in:\n{:?}",
            fixed.source
        );
    }
}

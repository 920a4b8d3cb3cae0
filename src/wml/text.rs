/// Flattened text access over the run children of a paragraph.
///
/// These operations see only the `Run` arm of [`ParagraphChild`]; the
/// wrapped kinds (hyperlinks, tracked changes, ...) carry their own runs
/// and are the business of richer consumers. Mutating operations edit
/// the per-run fragments in place so that formatting boundaries and
/// non-text content survive the edit.
use crate::wml::run::{ParagraphChild, RunContent};

/// Concatenation, in document order, of every literal text fragment in
/// every run child. Empty fragments contribute nothing; tabs, breaks,
/// and non-run children contribute nothing and do not interrupt the
/// ordering.
pub(crate) fn paragraph_text(children: &[ParagraphChild]) -> String {
    let mut result = String::new();
    for child in children {
        let Some(run) = child.as_run() else { continue };
        for content in run.contents() {
            if let Some(text) = content.as_text() {
                result.push_str(text);
            }
        }
    }
    result
}

/// Remove `prefix` from the front of the flattened text, applied
/// physically to the underlying fragments.
///
/// Walks text fragments in document order, clearing fragments wholly
/// covered by the prefix and truncating the fragment where the prefix
/// ends. `prefix` must be an exact prefix of [`paragraph_text`]'s
/// result; on a mismatch the walk stops at the offending fragment and
/// everything from it on is left untouched.
pub(crate) fn strip_text_from_left(children: &mut [ParagraphChild], prefix: &str) {
    let mut remaining = prefix;
    'children: for child in children.iter_mut() {
        let Some(run) = child.as_run_mut() else { continue };
        for content in run.contents_mut().iter_mut() {
            let RunContent::Text(text) = content else {
                continue;
            };
            if remaining.is_empty() {
                break 'children;
            }
            if text.len() >= remaining.len() {
                if text.starts_with(remaining) {
                    text.drain(..remaining.len());
                }
                break 'children;
            }
            if remaining.starts_with(text.as_str()) {
                remaining = &remaining[text.len()..];
                text.clear();
            } else {
                break 'children;
            }
        }
    }
}

/// Remove tab characters from the paragraph's leading region, returning
/// how many were removed.
///
/// The leading region covers run children only: tabs are popped from
/// the front of each run until the first non-tab content, at which
/// point the region ends permanently. A run holding nothing but tabs
/// does not end it; any non-run child does.
pub(crate) fn remove_initial_tabs(children: &mut [ParagraphChild]) -> usize {
    let mut removed = 0;
    'children: for child in children.iter_mut() {
        let Some(run) = child.as_run_mut() else { break };
        while let Some(first) = run.contents().first() {
            if !first.is_tab() {
                break 'children;
            }
            run.contents_mut().remove(0);
            removed += 1;
        }
    }
    removed
}

/// Count the tabs [`remove_initial_tabs`] would delete, without
/// mutating anything.
pub(crate) fn initial_tab_count(children: &[ParagraphChild]) -> usize {
    let mut count = 0;
    'children: for child in children {
        let Some(run) = child.as_run() else { break };
        for content in run.contents() {
            if !content.is_tab() {
                break 'children;
            }
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wml::run::{Hyperlink, Run, RunProperties};

    fn run(contents: Vec<RunContent>) -> ParagraphChild {
        ParagraphChild::Run(Run::new(contents, RunProperties::default()))
    }

    fn text(s: &str) -> RunContent {
        RunContent::Text(s.to_string())
    }

    fn run_texts(children: &[ParagraphChild]) -> Vec<String> {
        children
            .iter()
            .filter_map(|c| c.as_run())
            .map(|r| r.text())
            .collect()
    }

    #[test]
    fn test_text_concatenates_fragments_in_order() {
        let children = vec![
            run(vec![text("Hello"), RunContent::Tab, text(", ")]),
            ParagraphChild::Hyperlink(Hyperlink::new(None, vec![Run::from_text("skipped")])),
            run(vec![text("World"), RunContent::Break]),
        ];
        assert_eq!(paragraph_text(&children), "Hello, World");
    }

    #[test]
    fn test_strip_across_fragment_boundary() {
        let mut children = vec![run(vec![text("abc")]), run(vec![text("def")])];
        strip_text_from_left(&mut children, "abcd");
        assert_eq!(run_texts(&children), vec!["", "ef"]);
        assert_eq!(paragraph_text(&children), "ef");
    }

    #[test]
    fn test_strip_full_text_leaves_empty() {
        let mut children = vec![
            run(vec![text("one"), RunContent::Tab]),
            run(vec![text("two")]),
        ];
        let full = paragraph_text(&children);
        strip_text_from_left(&mut children, &full);
        assert_eq!(paragraph_text(&children), "");
        // Non-text content survives the strip.
        assert!(children[0].as_run().unwrap().contents().contains(&RunContent::Tab));
    }

    #[test]
    fn test_strip_empty_prefix_is_a_no_op() {
        let mut children = vec![run(vec![text("abc")])];
        strip_text_from_left(&mut children, "");
        assert_eq!(paragraph_text(&children), "abc");
    }

    #[test]
    fn test_strip_mismatch_stops_without_corrupting_later_runs() {
        let mut children = vec![run(vec![text("abc")]), run(vec![text("def")])];
        strip_text_from_left(&mut children, "abX");
        assert_eq!(run_texts(&children)[1], "def");
    }

    #[test]
    fn test_remove_initial_tabs_stops_at_first_text() {
        let mut children = vec![
            run(vec![RunContent::Tab, RunContent::Tab, text("a"), RunContent::Tab]),
            run(vec![RunContent::Tab, text("b")]),
        ];
        assert_eq!(initial_tab_count(&children), 2);
        assert_eq!(remove_initial_tabs(&mut children), 2);
        // The tab after "a" and the one opening the second run survive.
        assert!(children[0].as_run().unwrap().contents().contains(&RunContent::Tab));
        assert!(children[1].as_run().unwrap().contents()[0].is_tab());
    }

    #[test]
    fn test_all_tab_run_does_not_end_leading_region() {
        let mut children = vec![
            run(vec![RunContent::Tab, RunContent::Tab]),
            run(vec![RunContent::Tab, text("x")]),
        ];
        assert_eq!(initial_tab_count(&children), 3);
        assert_eq!(remove_initial_tabs(&mut children), 3);
        assert_eq!(paragraph_text(&children), "x");
    }

    #[test]
    fn test_non_run_child_ends_leading_region() {
        let mut children = vec![
            ParagraphChild::Hyperlink(Hyperlink::new(None, vec![Run::from_text("link")])),
            run(vec![RunContent::Tab, text("x")]),
        ];
        assert_eq!(initial_tab_count(&children), 0);
        assert_eq!(remove_initial_tabs(&mut children), 0);
    }

    #[test]
    fn test_remove_initial_tabs_is_idempotent() {
        let mut children = vec![run(vec![RunContent::Tab, text("a")])];
        assert_eq!(remove_initial_tabs(&mut children), 1);
        assert_eq!(remove_initial_tabs(&mut children), 0);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        /// Strategy to generate a single run content item.
        fn content_strategy() -> impl Strategy<Value = RunContent> {
            prop_oneof![
                3 => "[a-z]{0,6}".prop_map(RunContent::Text),
                2 => Just(RunContent::Tab),
                1 => Just(RunContent::Break),
            ]
        }

        /// Strategy to generate a paragraph's children: mostly runs,
        /// occasionally a hyperlink.
        fn children_strategy() -> impl Strategy<Value = Vec<ParagraphChild>> {
            prop::collection::vec(
                prop_oneof![
                    5 => prop::collection::vec(content_strategy(), 1..5)
                        .prop_map(|contents| run(contents)),
                    1 => Just(ParagraphChild::Hyperlink(Hyperlink::new(
                        None,
                        vec![Run::from_text("link")],
                    ))),
                ],
                0..6,
            )
        }

        proptest! {
            #[test]
            fn prop_tab_count_matches_tabs_removed(mut children in children_strategy()) {
                let counted = initial_tab_count(&children);
                let removed = remove_initial_tabs(&mut children);
                prop_assert_eq!(counted, removed);
            }

            #[test]
            fn prop_remove_initial_tabs_idempotent(mut children in children_strategy()) {
                remove_initial_tabs(&mut children);
                prop_assert_eq!(remove_initial_tabs(&mut children), 0);
            }

            #[test]
            fn prop_strip_full_text_round_trips_to_empty(mut children in children_strategy()) {
                let full = paragraph_text(&children);
                strip_text_from_left(&mut children, &full);
                prop_assert_eq!(paragraph_text(&children), "");
            }

            #[test]
            fn prop_strip_any_prefix_leaves_suffix(
                mut children in children_strategy(),
                split in 0usize..32,
            ) {
                let full = paragraph_text(&children);
                let split = split.min(full.len());
                let (prefix, suffix) = full.split_at(split);
                strip_text_from_left(&mut children, prefix);
                prop_assert_eq!(paragraph_text(&children), suffix);
            }
        }
    }
}

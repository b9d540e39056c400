//! Split a unit's text around its matches

use crate::types::{MatchSpan, Segment};

/// Split `text` into PLAIN and MATCH segments
///
/// `spans` must come from one locate pass (sorted, non-overlapping). Gaps
/// of zero length produce no segment, so the result never contains an empty
/// PLAIN segment. Spans that overlap an earlier one or do not fall on char
/// boundaries are ignored.
pub fn build(text: &str, spans: &[MatchSpan]) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
    let mut last_end = 0;

    for span in spans {
        if span.is_empty() || span.start < last_end {
            continue;
        }
        let Some(matched) = text.get(span.range()) else {
            continue;
        };

        if span.start > last_end {
            segments.push(Segment::plain(&text[last_end..span.start]));
        }
        segments.push(Segment::matched(matched));
        last_end = span.end;
    }

    if last_end < text.len() {
        segments.push(Segment::plain(&text[last_end..]));
    }

    segments
}

/// Concatenate segment texts in order
pub fn concat(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::locator::locate;
    use crate::types::{SearchSpec, SegmentKind};
    use proptest::prelude::*;

    #[test]
    fn test_segment_example() {
        let text = "see the cat sit";
        let segments = build(text, &[MatchSpan::new(4, 7)]);
        assert_eq!(
            segments,
            vec![
                Segment::plain("see "),
                Segment::matched("the"),
                Segment::plain(" cat sit"),
            ]
        );
    }

    #[test]
    fn test_no_spans() {
        assert_eq!(build("hello", &[]), vec![Segment::plain("hello")]);
        assert!(build("", &[]).is_empty());
    }

    #[test]
    fn test_zero_length_gaps_are_dropped() {
        let segments = build("aaaa", &[MatchSpan::new(0, 2), MatchSpan::new(2, 4)]);
        assert_eq!(segments, vec![Segment::matched("aa"), Segment::matched("aa")]);
        assert!(segments.iter().all(|s| !s.text.is_empty()));
    }

    #[test]
    fn test_whole_text_match() {
        let segments = build("cat", &[MatchSpan::new(0, 3)]);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].kind, SegmentKind::Match);
    }

    #[test]
    fn test_malformed_spans_do_not_panic() {
        let text = "héllo";
        // 2 is inside 'é'
        let segments = build(text, &[MatchSpan::new(0, 2), MatchSpan::new(3, 99)]);
        assert_eq!(concat(&segments), text);
    }

    proptest! {
        #[test]
        fn prop_round_trip(text in "[a-cA-C .é]{0,40}", term in "[a-cA-C]{1,3}", case_sensitive: bool) {
            let spec = SearchSpec::new(term, case_sensitive).unwrap();
            let spans = locate(&text, &spec).unwrap();
            let segments = build(&text, &spans);

            let rebuilt = concat(&segments);
            prop_assert_eq!(rebuilt, text);
            prop_assert!(segments.iter().all(|s| !s.text.is_empty()));
            prop_assert_eq!(segments.iter().filter(|s| s.is_match()).count(), spans.len());
        }

        #[test]
        fn prop_spans_sorted_and_disjoint(text in "[ab]{0,40}", term in "[ab]{1,3}") {
            let spec = SearchSpec::new(term, true).unwrap();
            let spans = locate(&text, &spec).unwrap();
            for pair in spans.windows(2) {
                prop_assert!(pair[0].end <= pair[1].start);
            }
            for span in &spans {
                prop_assert!(span.start < span.end && span.end <= text.len());
            }
        }
    }
}

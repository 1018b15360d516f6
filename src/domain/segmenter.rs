use crate::domain::types::{ExecutionSegment, MatchedCall};
use std::collections::BTreeMap;

/// Groups consecutive calls sharing the same intent into segments and reports
/// whether any intent is referenced by more than one segment.
///
/// Interleaving matters because a single redemption transaction may present a
/// delegation only once: redeeming the same grant twice inside one atomic
/// transaction would let it authorize more value movement than the user
/// approved per use. Contiguous runs batch cheaply; non-contiguous runs force
/// a split into separate transactions.
pub fn segment(matched: &[MatchedCall]) -> (Vec<ExecutionSegment>, bool) {
    let mut segments: Vec<ExecutionSegment> = Vec::new();
    for entry in matched {
        match segments.last_mut() {
            Some(current) if current.intent_index == entry.intent_index => {
                current.calls.push(entry.call.clone());
            }
            _ => segments.push(ExecutionSegment {
                intent_index: entry.intent_index,
                calls: vec![entry.call.clone()],
            }),
        }
    }

    let mut segments_per_intent: BTreeMap<usize, usize> = BTreeMap::new();
    for segment in &segments {
        *segments_per_intent.entry(segment.intent_index).or_insert(0) += 1;
    }
    let interleaved = segments_per_intent.values().any(|count| *count > 1);

    (segments, interleaved)
}

#[cfg(test)]
mod tests {
    use super::segment;
    use crate::domain::types::MatchedCall;
    use crate::test_support::{address, planned_call, selector};

    fn matched(intent_index: usize, tag: u8) -> MatchedCall {
        MatchedCall {
            call: planned_call(address(tag), selector(tag), &[tag]),
            intent_index,
        }
    }

    #[test]
    fn segment_groups_consecutive_calls_under_the_same_intent() {
        let input = vec![matched(0, 1), matched(0, 2), matched(1, 3)];
        let (segments, interleaved) = segment(&input);

        assert!(!interleaved);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].intent_index, 0);
        assert_eq!(segments[0].calls.len(), 2);
        assert_eq!(segments[1].intent_index, 1);
        assert_eq!(segments[1].calls.len(), 1);
    }

    #[test]
    fn segment_detects_interleaving_when_an_intent_recurs_non_adjacently() {
        let input = vec![matched(0, 1), matched(1, 2), matched(0, 3)];
        let (segments, interleaved) = segment(&input);

        assert!(interleaved);
        assert_eq!(segments.len(), 3);
        assert_eq!(
            segments.iter().map(|s| s.intent_index).collect::<Vec<_>>(),
            vec![0, 1, 0]
        );
    }

    #[test]
    fn segment_preserves_call_order_across_segments() {
        let input = vec![
            matched(2, 1),
            matched(2, 2),
            matched(0, 3),
            matched(1, 4),
            matched(1, 5),
        ];
        let (segments, _interleaved) = segment(&input);

        let flattened: Vec<_> = segments
            .iter()
            .flat_map(|segment| segment.calls.iter().cloned())
            .collect();
        let original: Vec<_> = input.iter().map(|entry| entry.call.clone()).collect();
        assert_eq!(flattened, original);
    }

    #[test]
    fn segment_of_empty_input_yields_no_segments() {
        let (segments, interleaved) = segment(&[]);
        assert!(segments.is_empty());
        assert!(!interleaved);
    }
}

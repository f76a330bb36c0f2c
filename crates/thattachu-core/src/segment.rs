//! Greedy longest-match segmentation between Tamil text and romanized
//! keystroke sequences.
//!
//! Both directions share one bounded-window scan: target segmentation
//! looks up Tamil clusters in the reverse map (window = longest cluster
//! in code points), the live preview looks up romanized runs in the
//! forward map (window = longest key in chars). Longest-first matching
//! keeps multi-point clusters like கா atomic instead of fragmenting
//! them at a shorter accidental match.

use serde::Serialize;
use tracing::trace;

use crate::phonetic::PhoneticTable;

/// One recognized unit of the target: a Tamil grapheme cluster (or a
/// pass-through literal) and the span it occupies in the flattened
/// keystroke sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharSpan {
    /// The Tamil cluster, or the literal character for unmapped input.
    pub grapheme: String,
    /// First index into the keystroke sequence.
    pub start: usize,
    /// Last index into the keystroke sequence (inclusive).
    pub end: usize,
    /// Length of the cluster in code points.
    pub len: usize,
    /// The romanized keys that produce this cluster.
    pub keys: String,
}

/// Segmentation of a target string: the flattened keystroke sequence the
/// typing session is judged against, and the per-cluster spans over it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Segmentation {
    pub keystrokes: Vec<char>,
    pub spans: Vec<CharSpan>,
}

impl Segmentation {
    pub fn is_empty(&self) -> bool {
        self.keystrokes.is_empty()
    }

    /// The span covering a keystroke index, for error attribution.
    pub fn span_at(&self, key_index: usize) -> Option<&CharSpan> {
        self.spans
            .iter()
            .find(|s| key_index >= s.start && key_index <= s.end)
    }

    /// Position of the span covering a keystroke index.
    pub fn span_index_at(&self, key_index: usize) -> Option<usize> {
        self.spans
            .iter()
            .position(|s| key_index >= s.start && key_index <= s.end)
    }
}

struct RawSegment {
    source: String,
    mapped: Option<String>,
}

/// Shared greedy scan: at each position try window lengths from
/// `max_window` down to 1; on a lookup hit consume that many code
/// points, otherwise pass the single code point through unmapped. The
/// cursor strictly advances, so the scan always terminates.
fn greedy_scan<'t>(
    input: &str,
    max_window: usize,
    lookup: impl Fn(&str) -> Option<&'t str>,
) -> Vec<RawSegment> {
    let chars: Vec<char> = input.chars().collect();
    let mut segments = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let mut matched = None;
        for len in (1..=max_window.min(chars.len() - i)).rev() {
            let window: String = chars[i..i + len].iter().collect();
            if let Some(value) = lookup(&window) {
                matched = Some((window, value.to_string(), len));
                break;
            }
        }

        match matched {
            Some((source, mapped, len)) => {
                segments.push(RawSegment {
                    source,
                    mapped: Some(mapped),
                });
                i += len;
            }
            None => {
                segments.push(RawSegment {
                    source: chars[i].to_string(),
                    mapped: None,
                });
                i += 1;
            }
        }
    }

    segments
}

impl PhoneticTable {
    /// Segment a Tamil target into the keystroke sequence needed to type
    /// it, with one `CharSpan` per recognized cluster. Unmapped code
    /// points (spaces, punctuation) contribute themselves as a
    /// single-key span. Total: never fails, empty input yields empty
    /// outputs.
    pub fn segment_target(&self, target: &str) -> Segmentation {
        let mut seg = Segmentation::default();

        for raw in greedy_scan(target, self.max_cluster_points(), |s| self.keys_for(s)) {
            let keys = raw.mapped.unwrap_or_else(|| raw.source.clone());
            let start = seg.keystrokes.len();
            seg.keystrokes.extend(keys.chars());
            seg.spans.push(CharSpan {
                len: raw.source.chars().count(),
                grapheme: raw.source,
                start,
                end: seg.keystrokes.len() - 1,
                keys,
            });
        }

        trace!(
            text = target,
            keystrokes = seg.keystrokes.len(),
            spans = seg.spans.len(),
            "segmented target"
        );
        seg
    }

    /// Convert arbitrary romanized input to Tamil for the live preview.
    /// Unmapped characters are emitted unchanged. Total: never fails.
    pub fn transliterate(&self, romanized: &str) -> String {
        greedy_scan(romanized, self.max_key_chars(), |s| self.cluster_for(s))
            .into_iter()
            .map(|raw| raw.mapped.unwrap_or(raw.source))
            .collect()
    }
}

use crate::render::RenderFrame;

/// Assert a stable text snapshot for a render frame.
///
/// `expected` may include a trailing newline; it is trimmed before comparison.
pub fn assert_render_frame_snapshot(label: &str, frame: &RenderFrame, expected: &str) {
    let expected = expected.trim_end_matches('\n');
    let got = frame.snapshot();
    assert_eq!(
        got, expected,
        "render frame snapshot mismatch ({label})\n--- expected\n{expected}\n--- got\n{got}",
    );
}

/// Number of times `needle` appears in the frame text, row by row.
#[must_use]
pub fn count_occurrences(frame: &RenderFrame, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    (0..frame.size().height)
        .map(|row| frame.row_text(row).matches(needle).count())
        .sum()
}

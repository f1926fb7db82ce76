//! Cross-character baseline calibration.

use std::collections::BTreeMap;

use log::debug;

use crate::extract::ProcessedCharacter;

/// Baseline used when no character in a batch has foreground pixels:
/// 80% of the render size.
pub const fn fallback_baseline(render_size: u32) -> u32 {
    render_size * 4 / 5
}

/// Most frequent value, or `None` for an empty input.
///
/// When several values share the highest frequency the smallest one wins,
/// so the result does not depend on input order.
pub fn mode(values: impl IntoIterator<Item = u32>) -> Option<u32> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    // Ascending iteration + strict comparison keeps the smallest tied value.
    let mut best: Option<(u32, usize)> = None;
    for (value, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Pick the shared baseline row for a batch of characters.
///
/// Empty characters are ignored; if none remain, `fallback` is returned.
pub fn calibrate_baseline<'a>(
    characters: impl IntoIterator<Item = &'a ProcessedCharacter>,
    fallback: u32,
) -> u32 {
    match mode(characters.into_iter().filter_map(ProcessedCharacter::max_y)) {
        Some(baseline) => {
            debug!("Calibrated baseline at row {baseline}");
            baseline
        }
        None => {
            debug!("No foreground rows in batch, using fallback baseline {fallback}");
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;
    use crate::extract::{Background, extract_foreground};

    fn character_with_bottom(row: u32) -> ProcessedCharacter {
        let mut image = RgbaImage::from_pixel(8, 40, Rgba([255, 255, 255, 255]));
        image.put_pixel(2, row, Rgba([0, 0, 0, 255]));
        extract_foreground(image, &Background::WHITE).unwrap()
    }

    #[test]
    fn test_mode_most_frequent() {
        assert_eq!(mode([30, 31, 30, 35, 30, 31]), Some(30));
    }

    #[test]
    fn test_mode_empty() {
        assert_eq!(mode([]), None);
    }

    #[test]
    fn test_mode_tie_takes_smallest() {
        assert_eq!(mode([12, 7, 12, 7]), Some(7));
        assert_eq!(mode([7, 12, 7, 12]), Some(7));
    }

    #[test]
    fn test_mode_order_independent() {
        let values = [5, 9, 9, 2, 5, 9, 2, 2, 9];
        let expected = mode(values);
        let mut reversed = values;
        reversed.reverse();
        let mut rotated = values;
        rotated.rotate_left(4);
        assert_eq!(mode(reversed), expected);
        assert_eq!(mode(rotated), expected);
        assert_eq!(expected, Some(9));
    }

    #[test]
    fn test_calibrate_ignores_empty_characters() {
        let characters = [
            character_with_bottom(30),
            ProcessedCharacter::empty(),
            character_with_bottom(30),
            character_with_bottom(36),
            ProcessedCharacter::empty(),
            ProcessedCharacter::empty(),
        ];
        assert_eq!(calibrate_baseline(&characters, 800), 30);
    }

    #[test]
    fn test_calibrate_fallback() {
        let characters = [ProcessedCharacter::empty(), ProcessedCharacter::empty()];
        assert_eq!(calibrate_baseline(&characters, fallback_baseline(1000)), 800);
        assert_eq!(calibrate_baseline([], 42), 42);
    }
}

/// Selections narrower or shorter than this collapse to "no selection".
pub const MIN_SELECTION_EXTENT: i32 = 5;

/// A rectangle in screen coordinates. During a drag the extents may be
/// negative (pointer moved left/up of the origin); `finalize` flips them
/// positive and applies the minimum-size threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaptureArea {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl CaptureArea {
    pub fn normalized(mut self) -> Self {
        if self.width < 0 {
            self.x += self.width;
            self.width = -self.width;
        }
        if self.height < 0 {
            self.y += self.height;
            self.height = -self.height;
        }
        self
    }

    /// Normalize, then collapse selections below the minimum threshold on
    /// either axis to zero extent.
    pub fn finalize(self) -> Self {
        let mut area = self.normalized();
        if area.width < MIN_SELECTION_EXTENT || area.height < MIN_SELECTION_EXTENT {
            area.width = 0;
            area.height = 0;
        }
        area
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::CaptureArea;

    fn drag(origin: (i32, i32), extent: (i32, i32)) -> CaptureArea {
        CaptureArea {
            x: origin.0,
            y: origin.1,
            width: extent.0,
            height: extent.1,
        }
    }

    #[test]
    fn normalization_is_sign_correct_for_all_four_quadrants() {
        let expected = CaptureArea {
            x: 60,
            y: 60,
            width: 40,
            height: 40,
        };
        assert_eq!(drag((60, 60), (40, 40)).finalize(), expected);
        assert_eq!(drag((100, 60), (-40, 40)).finalize(), expected);
        assert_eq!(drag((60, 100), (40, -40)).finalize(), expected);
        assert_eq!(drag((100, 100), (-40, -40)).finalize(), expected);
    }

    #[test]
    fn normalization_is_idempotent() {
        let area = drag((100, 100), (-40, -40)).finalize();
        assert_eq!(area.finalize(), area);
    }

    #[test]
    fn tiny_selections_collapse_to_zero_regardless_of_direction() {
        for extent in [(4, 40), (40, 4), (-4, 40), (40, -4), (2, 3)] {
            let area = drag((50, 50), extent).finalize();
            assert_eq!((area.width, area.height), (0, 0));
            assert!(area.is_empty());
        }
    }

    #[test]
    fn threshold_boundary_is_inclusive_at_five() {
        let area = drag((0, 0), (5, 5)).finalize();
        assert_eq!((area.width, area.height), (5, 5));
        assert!(!area.is_empty());
    }
}

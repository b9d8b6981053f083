/// Millimetres per inch; the browser's print API takes inches.
const MM_PER_INCH: f64 = 25.4;

/// Paper size in millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperFormat {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PaperFormat {
    /// ISO 216 A4: 210x297mm
    pub const A4: Self = Self {
        width_mm: 210.0,
        height_mm: 297.0,
    };

    pub fn width_in(&self) -> f64 {
        mm_to_in(self.width_mm)
    }

    pub fn height_in(&self) -> f64 {
        mm_to_in(self.height_mm)
    }
}

/// Page margins in millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top_mm: f64,
    pub bottom_mm: f64,
    pub left_mm: f64,
    pub right_mm: f64,
}

impl Margins {
    pub const fn uniform(mm: f64) -> Self {
        Self {
            top_mm: mm,
            bottom_mm: mm,
            left_mm: mm,
            right_mm: mm,
        }
    }
}

/// Paper format and margins used for every export
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub format: PaperFormat,
    pub margins: Margins,
}

impl PageLayout {
    /// A4 with 20mm on every side. Callers cannot change this.
    pub const REVIEW: Self = Self {
        format: PaperFormat::A4,
        margins: Margins::uniform(20.0),
    };
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::REVIEW
    }
}

pub fn mm_to_in(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

/// PostScript points (1/72 in), the unit of PDF page boxes
pub fn mm_to_pt(mm: f64) -> f64 {
    mm_to_in(mm) * 72.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_review_layout_is_a4_with_20mm_margins() {
        let layout = PageLayout::default();
        assert_eq!(layout.format, PaperFormat::A4);
        assert_eq!(layout.margins, Margins::uniform(20.0));
        assert_eq!(layout.margins.top_mm, 20.0);
        assert_eq!(layout.margins.bottom_mm, 20.0);
        assert_eq!(layout.margins.left_mm, 20.0);
        assert_eq!(layout.margins.right_mm, 20.0);
    }

    #[test]
    fn test_a4_in_inches() {
        assert!(approx(PaperFormat::A4.width_in(), 8.27));
        assert!(approx(PaperFormat::A4.height_in(), 11.69));
    }

    #[test]
    fn test_margin_in_inches() {
        assert!(approx(mm_to_in(20.0), 0.787));
    }

    #[test]
    fn test_a4_in_points() {
        assert!(approx(mm_to_pt(210.0), 595.28));
        assert!(approx(mm_to_pt(297.0), 841.89));
    }
}

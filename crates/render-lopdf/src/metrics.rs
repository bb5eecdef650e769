//! Advance widths of the PDF standard fonts, in 1/1000 em.
//!
//! Tables cover the printable ASCII range (codes 32 to 126). Other WinAnsi
//! codes use the font's `default_width`.

pub struct StandardMetrics {
    pub name: &'static str,
    pub ascii: &'static [u16; 95],
    pub default_width: u16,
}

impl StandardMetrics {
    /// Width of one WinAnsi byte.
    pub fn width(&self, code: u8) -> u16 {
        match code {
            32..=126 => self.ascii[(code - 32) as usize],
            0..=31 => 0,
            _ => self.default_width,
        }
    }
}

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

const MONOSPACE: [u16; 95] = [600; 95];

pub static STANDARD_FONTS: &[StandardMetrics] = &[
    StandardMetrics { name: "Helvetica", ascii: &HELVETICA, default_width: 556 },
    StandardMetrics { name: "Helvetica-Oblique", ascii: &HELVETICA, default_width: 556 },
    StandardMetrics { name: "Helvetica-Bold", ascii: &HELVETICA_BOLD, default_width: 556 },
    StandardMetrics { name: "Helvetica-BoldOblique", ascii: &HELVETICA_BOLD, default_width: 556 },
    StandardMetrics { name: "Times-Roman", ascii: &TIMES_ROMAN, default_width: 500 },
    StandardMetrics { name: "Times-Bold", ascii: &TIMES_BOLD, default_width: 500 },
    StandardMetrics { name: "Courier", ascii: &MONOSPACE, default_width: 600 },
    StandardMetrics { name: "Courier-Oblique", ascii: &MONOSPACE, default_width: 600 },
    StandardMetrics { name: "Courier-Bold", ascii: &MONOSPACE, default_width: 600 },
    StandardMetrics { name: "Courier-BoldOblique", ascii: &MONOSPACE, default_width: 600 },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(name: &str) -> &'static StandardMetrics {
        STANDARD_FONTS.iter().find(|m| m.name == name).unwrap()
    }

    #[test]
    fn test_known_widths() {
        let helv = metrics("Helvetica");
        assert_eq!(helv.width(b' '), 278);
        assert_eq!(helv.width(b'A'), 667);
        assert_eq!(helv.width(b'W'), 944);
        assert_eq!(helv.width(b'i'), 222);
        assert_eq!(helv.width(b'~'), 584);

        let bold = metrics("Helvetica-Bold");
        assert_eq!(bold.width(b'0'), 556);
        assert_eq!(bold.width(b'm'), 889);

        assert_eq!(metrics("Times-Roman").width(b'M'), 889);
        assert_eq!(metrics("Times-Bold").width(b'%'), 1000);
        assert_eq!(metrics("Courier").width(b'i'), 600);
    }

    #[test]
    fn test_out_of_table_codes() {
        let helv = metrics("Helvetica");
        assert_eq!(helv.width(b'\n'), 0);
        assert_eq!(helv.width(0xE9), 556);
    }
}

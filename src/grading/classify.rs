use serde::Serialize;

/// Visual weight of a band, mapped to colors by the terminal front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Info,
    Accent,
    Caution,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Band {
    pub label: &'static str,
    pub tone: Tone,
}

const fn band(label: &'static str, tone: Tone) -> Band {
    Band { label, tone }
}

/// Ordered list of `(minimum, band)` rungs, highest minimum first.
///
/// The first rung whose minimum the score reaches wins; scores below every
/// rung (and NaN) land on `floor`.
#[derive(Debug)]
pub struct Ladder {
    pub rungs: &'static [(f64, Band)],
    pub floor: Band,
}

impl Ladder {
    pub fn classify(&self, score: f64) -> Band {
        self.rungs
            .iter()
            .find(|(min, _)| score >= *min)
            .map(|(_, band)| *band)
            .unwrap_or(self.floor)
    }
}

pub static PERCENTAGE_LADDER: Ladder = Ladder {
    rungs: &[
        (90.0, band("A+ Grade", Tone::Success)),
        (80.0, band("A Grade", Tone::Info)),
        (70.0, band("B Grade", Tone::Accent)),
        (60.0, band("C Grade", Tone::Caution)),
        (50.0, band("D Grade", Tone::Warning)),
    ],
    floor: band("F Grade", Tone::Danger),
};

pub static GPA_LADDER: Ladder = Ladder {
    rungs: &[
        (9.0, band("Excellent!", Tone::Success)),
        (8.0, band("Very Good", Tone::Info)),
        (7.0, band("Good", Tone::Accent)),
        (6.0, band("Satisfactory", Tone::Caution)),
        (5.0, band("Pass", Tone::Warning)),
    ],
    floor: band("Needs Improvement", Tone::Danger),
};

pub static CGPA_LADDER: Ladder = Ladder {
    rungs: &[
        (9.0, band("Outstanding Performance!", Tone::Success)),
        (8.0, band("Excellent Work", Tone::Info)),
        (7.0, band("Very Good", Tone::Accent)),
        (6.0, band("Good", Tone::Caution)),
        (5.0, band("Satisfactory", Tone::Warning)),
    ],
    floor: band("Keep Working Hard!", Tone::Danger),
};

pub fn classify_percentage(percentage: f64) -> Band {
    PERCENTAGE_LADDER.classify(percentage)
}

pub fn classify_gpa(gpa: f64) -> Band {
    GPA_LADDER.classify(gpa)
}

pub fn classify_cgpa(cgpa: f64) -> Band {
    CGPA_LADDER.classify(cgpa)
}

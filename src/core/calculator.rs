use crate::domain::model::{Application, Culture, Input};

/// Liters of `input` needed to treat `culture`, in total and per subdivision.
pub fn calculate(culture: &Culture, input: &Input) -> Application {
    let total = culture.total_area() * input.dose_per_area;
    let per_subdivision = if culture.subdivision_count() > 0 {
        total / f64::from(culture.subdivision_count())
    } else {
        0.0
    };

    Application {
        total,
        per_subdivision,
    }
}

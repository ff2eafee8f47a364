/// User-facing summary of one detection run.
///
/// Zero faces is reported as a warning, never as success and never as a
/// failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectionReport {
    Success(usize),
    NoFaces,
}

pub const NO_FACES_MESSAGE: &str =
    "Nenhuma face foi detectada. Tente relaxar os parâmetros no Painel de Controle.";

impl DetectionReport {
    pub fn from_count(count: usize) -> Self {
        if count > 0 {
            DetectionReport::Success(count)
        } else {
            DetectionReport::NoFaces
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DetectionReport::Success(_))
    }

    pub fn face_count(&self) -> usize {
        match self {
            DetectionReport::Success(n) => *n,
            DetectionReport::NoFaces => 0,
        }
    }

    pub fn message(&self) -> String {
        match self {
            DetectionReport::Success(n) => format!("{n} face(s) detectada(s)!"),
            DetectionReport::NoFaces => NO_FACES_MESSAGE.to_string(),
        }
    }
}

impl std::fmt::Display for DetectionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_zero_is_no_faces() {
        let report = DetectionReport::from_count(0);
        assert_eq!(report, DetectionReport::NoFaces);
        assert!(!report.is_success());
        assert_eq!(report.message(), NO_FACES_MESSAGE);
        assert!(!report.message().contains("detectada(s)!"));
    }

    #[rstest]
    #[case(1, "1 face(s) detectada(s)!")]
    #[case(3, "3 face(s) detectada(s)!")]
    #[case(12, "12 face(s) detectada(s)!")]
    fn test_success_message_contains_exact_count(#[case] n: usize, #[case] expected: &str) {
        let report = DetectionReport::from_count(n);
        assert!(report.is_success());
        assert_eq!(report.face_count(), n);
        assert_eq!(report.message(), expected);
    }

    #[test]
    fn test_display_matches_message() {
        assert_eq!(DetectionReport::Success(2).to_string(), "2 face(s) detectada(s)!");
    }
}

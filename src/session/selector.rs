// src/session/selector.rs
use crate::extractors::SectionSet;
use crate::utils::error::SelectionError;
use std::io::{self, Write};

/// Prints every title with its 1-based number.
pub fn list_sections<W: Write>(sections: &SectionSet, out: &mut W) -> io::Result<()> {
    writeln!(out, "\nDetected sections:")?;
    for (i, title) in sections.titles().enumerate() {
        writeln!(out, "{}. {}", i + 1, title)?;
    }
    Ok(())
}

/// Turns a 1-based choice into a 0-based index into `count` sections.
pub fn resolve_choice(choice: &str, count: usize) -> Result<usize, SelectionError> {
    let trimmed = choice.trim();
    let number: i64 = trimmed
        .parse()
        .map_err(|_| SelectionError::NotANumber(trimmed.to_string()))?;

    match usize::try_from(number) {
        Ok(n) if (1..=count).contains(&n) => Ok(n - 1),
        _ => Err(SelectionError::OutOfRange { choice: number, count }),
    }
}

/// Narrows `sections` to the chosen one.
///
/// An absent or blank choice keeps everything. An invalid choice is reported
/// and also keeps everything.
pub fn select<W: Write>(sections: SectionSet, choice: Option<&str>, out: &mut W) -> io::Result<SectionSet> {
    let choice = match choice.map(str::trim) {
        Some(c) if !c.is_empty() => c,
        _ => return Ok(sections),
    };

    let count = sections.len();
    let selected = resolve_choice(choice, count).and_then(|index| {
        sections
            .only(index)
            .ok_or(SelectionError::OutOfRange { choice: index as i64 + 1, count })
    });

    let single = match selected {
        Ok(single) => single,
        Err(e) => {
            tracing::warn!("Invalid section choice: {}", e);
            writeln!(out, "Invalid choice, using all sections.")?;
            return Ok(sections);
        }
    };

    if let Some(title) = single.titles().next() {
        writeln!(out, "\nSelected section: {}", title)?;
        tracing::info!("Narrowed to section '{}'", title);
    }
    Ok(single)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SectionSet {
        vec![("Intro", " a"), ("Usage", " b"), ("FAQ", " c")].into_iter().collect()
    }

    fn run_select(choice: Option<&str>) -> (SectionSet, String) {
        let mut out = Vec::new();
        let result = select(sample(), choice, &mut out).unwrap();
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_empty_choice_keeps_all_sections() {
        assert_eq!(run_select(None).0, sample());
        assert_eq!(run_select(Some("")).0, sample());
        assert_eq!(run_select(Some("   ")).0, sample());
    }

    #[test]
    fn test_first_choice_selects_first_section() {
        let (selected, out) = run_select(Some("1"));
        assert_eq!(selected.iter().collect::<Vec<_>>(), vec![("Intro", " a")]);
        assert!(out.contains("Selected section: Intro"));
    }

    #[test]
    fn test_last_choice_with_surrounding_whitespace() {
        let (selected, _) = run_select(Some(" 3 "));
        assert_eq!(selected.iter().collect::<Vec<_>>(), vec![("FAQ", " c")]);
    }

    #[test]
    fn test_invalid_choices_fall_back_to_all_sections() {
        for choice in ["999", "abc", "0", "-1", "1.5", "4"] {
            let (selected, out) = run_select(Some(choice));
            assert_eq!(selected, sample(), "choice {:?} should keep all sections", choice);
            assert!(out.contains("Invalid choice"), "choice {:?} should be reported", choice);
        }
    }

    #[test]
    fn test_any_choice_on_empty_set_is_reported() {
        let mut out = Vec::new();
        let selected = select(SectionSet::new(), Some("1"), &mut out).unwrap();
        assert!(selected.is_empty());
        assert!(String::from_utf8(out).unwrap().contains("Invalid choice"));
    }

    #[test]
    fn test_resolve_choice_errors() {
        assert_eq!(resolve_choice("2", 3), Ok(1));
        assert_eq!(
            resolve_choice("x", 3),
            Err(SelectionError::NotANumber("x".to_string()))
        );
        assert_eq!(
            resolve_choice("0", 3),
            Err(SelectionError::OutOfRange { choice: 0, count: 3 })
        );
        assert_eq!(
            resolve_choice("-2", 3),
            Err(SelectionError::OutOfRange { choice: -2, count: 3 })
        );
    }

    #[test]
    fn test_list_sections_numbers_from_one() {
        let mut out = Vec::new();
        list_sections(&sample(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("1. Intro\n2. Usage\n3. FAQ\n"));
    }
}

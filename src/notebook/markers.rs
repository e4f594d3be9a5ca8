// file: src/notebook/markers.rs
// description: classification of markdown cells by their exercise/hint/solution marker
// reference: path-based classifier reshaped for cell headings

use crate::error::{PressError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Exercise,
    Hint,
    Solution,
    Plain,
}

impl CellKind {
    const MARKED: [CellKind; 3] = [CellKind::Exercise, CellKind::Hint, CellKind::Solution];

    pub fn marker(self) -> Option<&'static str> {
        match self {
            Self::Exercise => Some("### Exercise"),
            Self::Hint => Some("### Hint"),
            Self::Solution => Some("### Solution"),
            Self::Plain => None,
        }
    }

    /// A marker line starts with the marker followed by the end of the line
    /// or a non-alphanumeric character, so `### Exercise 2: Loops` counts and
    /// `### Exercises` does not.
    fn from_line(line: &str) -> Option<Self> {
        Self::MARKED.into_iter().find(|kind| {
            kind.marker()
                .and_then(|marker| line.strip_prefix(marker))
                .is_some_and(|rest| !rest.starts_with(char::is_alphanumeric))
        })
    }
}

/// Title and body of a marked cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedCell<'a> {
    pub kind: CellKind,
    pub title: &'a str,
    pub body: String,
}

/// Decides the kind of a markdown cell. A cell may hold at most one marker
/// and it has to be the first line.
pub fn classify(text: &str) -> Result<CellKind> {
    let found: Vec<(usize, CellKind)> = text
        .split('\n')
        .enumerate()
        .filter_map(|(index, line)| CellKind::from_line(line).map(|kind| (index, kind)))
        .collect();

    match found.as_slice() {
        [] => Ok(CellKind::Plain),
        [(0, kind)] => Ok(*kind),
        [(index, kind)] => Err(PressError::Validation(format!(
            "`{}` must open the cell, found on line {}",
            kind.marker().unwrap_or_default(),
            index + 1
        ))),
        many => Err(PressError::Validation(format!(
            "cell has {} markers ({}); split it into one cell per marker",
            many.len(),
            many.iter()
                .map(|(_, kind)| kind.marker().unwrap_or_default())
                .collect::<Vec<_>>()
                .join(", ")
        ))),
    }
}

/// Splits a marked cell into its title (first line without `### `) and body.
pub fn split_marked(text: &str) -> Result<Option<MarkedCell<'_>>> {
    let kind = classify(text)?;
    if kind == CellKind::Plain {
        return Ok(None);
    }

    let (first, body) = text.split_once('\n').unwrap_or((text, ""));
    let title = first.strip_prefix("### ").unwrap_or(first);

    Ok(Some(MarkedCell {
        kind,
        title,
        body: body.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_markers() {
        assert_eq!(classify("### Exercise\nDo the thing.").unwrap(), CellKind::Exercise);
        assert_eq!(classify("### Hint").unwrap(), CellKind::Hint);
        assert_eq!(classify("### Solution 3: loops\ncode").unwrap(), CellKind::Solution);
        assert_eq!(classify("## Exercise\ntext").unwrap(), CellKind::Plain);
        assert_eq!(classify("### exercise\ntext").unwrap(), CellKind::Plain);
        assert_eq!(classify("### Exercises\nlist").unwrap(), CellKind::Plain);
        assert_eq!(classify("").unwrap(), CellKind::Plain);
    }

    #[test]
    fn test_multiple_markers_rejected() {
        let err = classify("### Exercise\nTry it.\n### Hint\nLook left.").unwrap_err();
        match err {
            PressError::Validation(message) => {
                assert!(message.contains("2 markers"));
                assert!(message.contains("### Exercise, ### Hint"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_marker_must_open_cell() {
        let err = classify("Intro text\n### Solution\nanswer").unwrap_err();
        assert!(matches!(err, PressError::Validation(message) if message.contains("line 2")));
    }

    #[test]
    fn test_marker_inside_a_line_is_not_a_marker() {
        assert_eq!(
            classify("See the ### Hint section later").unwrap(),
            CellKind::Plain
        );
    }

    #[test]
    fn test_split_marked_title_and_body() {
        let marked = split_marked("### Solution\nline1\nline2").unwrap().unwrap();
        assert_eq!(marked.kind, CellKind::Solution);
        assert_eq!(marked.title, "Solution");
        assert_eq!(marked.body, "line1\nline2");

        let marked = split_marked("### Exercise 1: Vectors").unwrap().unwrap();
        assert_eq!(marked.title, "Exercise 1: Vectors");
        assert_eq!(marked.body, "");

        assert!(split_marked("plain text").unwrap().is_none());
    }
}

//! Render tree produced by the flows. Front ends decide how to draw it.

use std::fmt;

use shared::{
    domain::{Program, ProgramCode, Subject},
    grades::{classify, format_average, GradeStatus},
};

/// Page areas a flow writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Welcome,
    ProgramSelector,
    MainContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOption {
    pub value: ProgramCode,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectBlock {
    pub name: String,
    pub average_label: String,
    pub status: GradeStatus,
}

impl SubjectBlock {
    pub fn from_subject(subject: &Subject, threshold: f64) -> Self {
        Self {
            name: subject.name.clone(),
            average_label: format_average(subject.average),
            status: classify(subject.average, threshold),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Text(String),
    Notice { text: String, tone: Tone },
    Selector {
        options: Vec<SelectorOption>,
        selected: Option<ProgramCode>,
    },
    SubjectGrid(Vec<SubjectBlock>),
}

impl View {
    pub fn info(text: impl Into<String>) -> Self {
        Self::Notice {
            text: text.into(),
            tone: Tone::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::Notice {
            text: text.into(),
            tone: Tone::Error,
        }
    }

    /// One option per program, in the given order, first one selected.
    pub fn program_selector(programs: &[Program]) -> Self {
        Self::Selector {
            options: programs
                .iter()
                .map(|p| SelectorOption {
                    value: p.code.clone(),
                    label: p.name.clone(),
                })
                .collect(),
            selected: programs.first().map(|p| p.code.clone()),
        }
    }

    pub fn subject_grid(subjects: &[Subject], threshold: f64) -> Self {
        Self::SubjectGrid(
            subjects
                .iter()
                .map(|s| SubjectBlock::from_subject(s, threshold))
                .collect(),
        )
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Text(text) => f.write_str(text),
            View::Notice {
                text,
                tone: Tone::Info,
            } => f.write_str(text),
            View::Notice {
                text,
                tone: Tone::Error,
            } => write!(f, "error: {text}"),
            View::Selector { options, selected } => {
                for (i, option) in options.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    let mark = if selected.as_ref() == Some(&option.value) {
                        '*'
                    } else {
                        ' '
                    };
                    write!(f, "{mark} [{}] {}", option.value, option.label)?;
                }
                Ok(())
            }
            View::SubjectGrid(blocks) => {
                for (i, block) in blocks.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    if let Some(class) = block.status.marker_class() {
                        write!(f, "[{class}] ")?;
                    }
                    write!(f, "{} | Promedio: {}", block.name, block.average_label)?;
                }
                Ok(())
            }
        }
    }
}

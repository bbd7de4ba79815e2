// Interpreter error signatures and their remediation hints

use std::fmt;

/// Substrings that mark an output transcript as a crashed run.
/// The specific kinds are matched separately through `ErrorKind::PRIORITY`.
const GENERIC_MARKERS: [&str; 3] = ["Error:", "Traceback", "❌"];

/// Kind of interpreter error recognized in a learner's output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    Name,
    Type,
    Value,
    Index,
    Key,
    Attribute,
    Indentation,
    ZeroDivision,
    ModuleNotFound,
    Import,
    Runtime,
    StopIteration,
    Recursion,
    /// Only a generic marker (`Error:`, `Traceback`, `❌`) was present
    Unknown,
}

impl ErrorKind {
    /// Scan order used to pick the reported kind. First hit wins.
    pub const PRIORITY: [ErrorKind; 14] = [
        ErrorKind::Syntax,
        ErrorKind::Name,
        ErrorKind::Type,
        ErrorKind::Value,
        ErrorKind::Index,
        ErrorKind::Key,
        ErrorKind::Attribute,
        ErrorKind::Indentation,
        ErrorKind::ZeroDivision,
        ErrorKind::ModuleNotFound,
        ErrorKind::Import,
        ErrorKind::Runtime,
        ErrorKind::StopIteration,
        ErrorKind::Recursion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Name => "NameError",
            ErrorKind::Type => "TypeError",
            ErrorKind::Value => "ValueError",
            ErrorKind::Index => "IndexError",
            ErrorKind::Key => "KeyError",
            ErrorKind::Attribute => "AttributeError",
            ErrorKind::Indentation => "IndentationError",
            ErrorKind::ZeroDivision => "ZeroDivisionError",
            ErrorKind::ModuleNotFound => "ModuleNotFoundError",
            ErrorKind::Import => "ImportError",
            ErrorKind::Runtime => "RuntimeError",
            ErrorKind::StopIteration => "StopIteration",
            ErrorKind::Recursion => "RecursionError",
            ErrorKind::Unknown => "Unknown Error",
        }
    }

    /// Static remediation hints shown to the learner
    pub fn suggestions(&self) -> &'static [&'static str] {
        match self {
            ErrorKind::Syntax => &[
                "Check for missing colons, brackets, or quotation marks",
                "Make sure every opening parenthesis has a closing one",
            ],
            ErrorKind::Name => &[
                "Check that every variable is defined before you use it",
                "Look for typos in variable and function names",
            ],
            ErrorKind::Type => &[
                "Check that you are combining compatible data types",
                "Convert values explicitly with str(), int() or float() when needed",
            ],
            ErrorKind::Value => &[
                "Check that the values you pass to functions are valid",
                "Make sure text you convert to a number actually contains a number",
            ],
            ErrorKind::Index => &[
                "Remember that indexing starts at 0",
                "Check that the index is smaller than the length of the list",
            ],
            ErrorKind::Key => &[
                "Check that the key exists in the dictionary",
                "Use .get() to read a key that might be missing",
            ],
            ErrorKind::Attribute => &[
                "Check that the object has the method or attribute you are calling",
                "Look for typos in the method name",
            ],
            ErrorKind::Indentation => &[
                "Indent code blocks consistently, 4 spaces per level",
                "Do not mix tabs and spaces",
            ],
            ErrorKind::ZeroDivision => &[
                "Make sure you never divide by zero",
                "Check the divisor with an if statement before dividing",
            ],
            ErrorKind::ModuleNotFound => &[
                "Check the spelling of the module name",
                "Only import modules that are available in this environment",
            ],
            ErrorKind::Import => &[
                "Check the name you are importing from the module",
            ],
            ErrorKind::Runtime => &[
                "Read the error message to see which line failed",
            ],
            ErrorKind::StopIteration => &[
                "Make sure you don't call next() on an exhausted iterator",
            ],
            ErrorKind::Recursion => &[
                "Make sure your recursive function has a base case that stops it",
                "Check that each recursive call moves closer to the base case",
            ],
            ErrorKind::Unknown => &["Review the error message carefully"],
        }
    }

    /// Detect an error transcript. Returns `None` when no signature matched.
    pub fn detect(actual_output: &str) -> Option<ErrorKind> {
        if let Some(kind) = Self::PRIORITY
            .iter()
            .find(|kind| actual_output.contains(kind.as_str()))
        {
            return Some(*kind);
        }

        if GENERIC_MARKERS
            .iter()
            .any(|marker| actual_output.contains(marker))
        {
            return Some(ErrorKind::Unknown);
        }

        None
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

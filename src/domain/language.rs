/// Supported languages and their identifiers.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Language {
    Cpp,
    CSharp,
    Java,
    Javascript,
    Python,
}

impl Language {
    /// Menu order.
    pub const ALL: [Language; 5] = [
        Language::Cpp,
        Language::CSharp,
        Language::Java,
        Language::Javascript,
        Language::Python,
    ];

    /// Stable identifier (used for colours and the terminal title).
    pub fn id(self) -> &'static str {
        match self {
            Language::Cpp => "C++",
            Language::CSharp => "C#",
            Language::Java => "Java",
            Language::Javascript => "Javascript",
            Language::Python => "Python",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::Javascript => "JavaScript",
            other => other.id(),
        }
    }

    /// File stem of the optional JSON override in the words directory.
    pub fn word_file_stem(self) -> &'static str {
        match self {
            Language::Cpp => "cpp23",
            Language::CSharp => "csharp10",
            Language::Java => "java17",
            Language::Javascript => "javascriptES2023",
            Language::Python => "python3.14",
        }
    }

    pub fn from_id(id: &str) -> Option<Language> {
        Language::ALL.iter().copied().find(|l| l.id() == id)
    }
}

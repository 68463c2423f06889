/// Word source: keyword and primitive-type lists per language.
///
/// Built-in lists are compiled in. A `<stem>.json` file in the configured
/// words directory replaces the built-in list for that language, using the
/// same shape: `{"keywords": [...], "primitives": [...]}`.

use std::path::Path;

use serde::Deserialize;

use super::language::Language;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct WordList {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub primitives: Vec<String>,
}

impl WordList {
    fn from_static(keywords: &[&str], primitives: &[&str]) -> Self {
        WordList {
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            primitives: primitives.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Load the list for `lang`, preferring an override file in `words_dir`.
/// Unreadable or malformed overrides fall back to the built-in list.
pub fn load(lang: Language, words_dir: &Path) -> WordList {
    let path = words_dir.join(format!("{}.json", lang.word_file_stem()));
    if !path.is_file() {
        return embedded(lang);
    }
    match std::fs::read_to_string(&path) {
        Ok(text) => match serde_json::from_str::<WordList>(&text) {
            Ok(list) => {
                log::info!(
                    "loaded {} keywords / {} primitives from {}",
                    list.keywords.len(), list.primitives.len(), path.display(),
                );
                list
            }
            Err(e) => {
                log::warn!("{} parse error: {e}; using built-in {} words", path.display(), lang.id());
                embedded(lang)
            }
        },
        Err(e) => {
            log::warn!("could not read {}: {e}; using built-in {} words", path.display(), lang.id());
            embedded(lang)
        }
    }
}

pub fn embedded(lang: Language) -> WordList {
    match lang {
        Language::Cpp => WordList::from_static(CPP_KEYWORDS, CPP_PRIMITIVES),
        Language::CSharp => WordList::from_static(CSHARP_KEYWORDS, CSHARP_PRIMITIVES),
        Language::Java => WordList::from_static(JAVA_KEYWORDS, JAVA_PRIMITIVES),
        Language::Javascript => WordList::from_static(JS_KEYWORDS, JS_PRIMITIVES),
        Language::Python => WordList::from_static(PYTHON_KEYWORDS, PYTHON_PRIMITIVES),
    }
}

// ── C++23 ──

const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor",
    "bool", "break", "case", "catch", "char", "char8_t", "char16_t", "char32_t",
    "class", "compl", "concept", "const", "consteval", "constexpr", "constinit",
    "const_cast", "continue", "co_await", "co_return", "co_yield", "decltype",
    "default", "delete", "do", "double", "dynamic_cast", "else", "enum",
    "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept",
    "not", "not_eq", "nullptr", "operator", "or", "or_eq", "private",
    "protected", "public", "register", "reinterpret_cast", "requires", "return",
    "short", "signed", "sizeof", "static", "static_assert", "static_cast",
    "struct", "switch", "template", "this", "thread_local", "throw", "true",
    "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

const CPP_PRIMITIVES: &[&str] = &[
    "bool", "char", "char8_t", "char16_t", "char32_t", "wchar_t", "short",
    "int", "long", "float", "double", "void", "size_t", "ptrdiff_t",
    "int8_t", "int16_t", "int32_t", "int64_t", "uint8_t", "uint16_t",
    "uint32_t", "uint64_t", "nullptr_t", "std::byte",
];

// ── C# 10 ──

const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char",
    "checked", "class", "const", "continue", "decimal", "default", "delegate",
    "do", "double", "else", "enum", "event", "explicit", "extern", "false",
    "finally", "fixed", "float", "for", "foreach", "goto", "if", "implicit",
    "in", "int", "interface", "internal", "is", "lock", "long", "namespace",
    "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "record", "ref", "return",
    "sbyte", "sealed", "short", "sizeof", "stackalloc", "static", "string",
    "struct", "switch", "this", "throw", "true", "try", "typeof", "uint",
    "ulong", "unchecked", "unsafe", "ushort", "using", "virtual", "void",
    "volatile", "while", "async", "await", "dynamic", "get", "init", "nameof",
    "var", "when", "where", "yield",
];

const CSHARP_PRIMITIVES: &[&str] = &[
    "bool", "byte", "sbyte", "char", "decimal", "double", "float", "int",
    "uint", "nint", "nuint", "long", "ulong", "short", "ushort", "object",
    "string", "dynamic",
];

// ── Java 17 ──

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char",
    "class", "const", "continue", "default", "do", "double", "else", "enum",
    "extends", "final", "finally", "float", "for", "goto", "if", "implements",
    "import", "instanceof", "int", "interface", "long", "native", "new",
    "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while", "var", "yield", "record",
    "sealed", "permits", "non-sealed",
];

const JAVA_PRIMITIVES: &[&str] = &[
    "byte", "short", "int", "long", "float", "double", "boolean", "char",
];

// ── JavaScript ES2023 ──

const JS_KEYWORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue",
    "debugger", "default", "delete", "do", "else", "export", "extends",
    "false", "finally", "for", "function", "if", "import", "in", "instanceof",
    "let", "new", "null", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
    "async", "of", "get", "set",
];

const JS_PRIMITIVES: &[&str] = &[
    "string", "number", "bigint", "boolean", "undefined", "symbol", "null",
];

// ── Python 3.14 ──

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break",
    "class", "continue", "def", "del", "elif", "else", "except", "finally",
    "for", "from", "global", "if", "import", "in", "is", "lambda", "nonlocal",
    "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
    "match", "case", "type",
];

const PYTHON_PRIMITIVES: &[&str] = &[
    "int", "float", "complex", "str", "bytes", "bool", "bytearray", "list",
    "tuple", "dict", "set", "frozenset", "range", "memoryview", "NoneType",
];

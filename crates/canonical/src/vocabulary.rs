//! Fixed lexical vocabulary for C/C++-like source.
//!
//! The vocabulary is read-only data: operator symbols and three disjoint name
//! sets (type names, keywords, standard-library symbols). It is built once and
//! shared by every lexing and canonicalization call, so it is safe to use from
//! any number of threads without locking.
//!
//! Names are found anywhere in the text, not only as whole words: the lexer
//! asks [`Vocabulary::name_at`] for the longest name starting at each position.
//!
//! ```
//! use canonical::{TokenKind, Vocabulary};
//!
//! let vocab = Vocabulary::shared();
//! assert_eq!(vocab.classify_word("int"), TokenKind::Type);
//! assert_eq!(vocab.classify_word("while"), TokenKind::Keyword);
//! assert_eq!(vocab.classify_word("printf"), TokenKind::StdlibSymbol);
//! assert_eq!(vocab.classify_word("total"), TokenKind::Identifier);
//! assert_eq!(vocab.operator_at("<<= 1"), Some("<<"));
//! assert_eq!(vocab.name_at("integer"), Some("int"));
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::token::TokenKind;

/// Operators that may be glued to their neighbours (`cin<<a`, `i++`).
///
/// Ordered longest-first so that `<<` is never split into `<` `<`.
const OPERATORS: &[&str] = &[
    "<<", ">>", "++", "--", "==", "!=", "<=", ">=", "{", "}", "#", "(", ")", ",", ";", "\"",
    "'", "&", "+", "-", "*", "/", "=", "%", "<", ">",
];

/// Windows platform integer and handle typedefs.
const PLATFORM_TYPES: &[&str] = &[
    "ATOM", "BOOL", "BOOLEAN", "BYTE", "CHAR", "COLORREF", "DWORD", "DWORDLONG",
    "DWORD_PTR", "DWORD32", "DWORD64", "FLOAT", "HACCEL", "HALF_PTR", "HANDLE", "HBITMAP",
    "HBRUSH", "HCOLORSPACE", "HCONV", "HCONVLIST", "HCURSOR", "HDC", "HDDEDATA", "HDESK",
    "HDROP", "HDWP", "HENHMETAFILE", "HFILE", "HFONT", "HGDIOBJ", "HGLOBAL", "HHOOK",
    "HICON", "HINSTANCE", "HKEY", "HKL", "HLOCAL", "HMENU", "HMETAFILE", "HMODULE",
    "HMONITOR", "HPALETTE", "HPEN", "HRESULT", "HRGN", "HRSRC", "HSZ", "HWINSTA", "HWND",
    "INT", "INT_PTR", "INT32", "INT64", "LANGID", "LCID", "LCTYPE", "LGRPID", "LONG",
    "LONGLONG", "LONG_PTR", "LONG32", "LONG64", "LPARAM", "LPBOOL", "LPBYTE", "LPCOLORREF",
    "LPCSTR", "LPCTSTR", "LPCVOID", "LPCWSTR", "LPDWORD", "LPHANDLE", "LPINT", "LPLONG",
    "LPSTR", "LPTSTR", "LPVOID", "LPWORD", "LPWSTR", "LRESULT", "PBOOL", "PBOOLEAN",
    "PBYTE", "PCHAR", "PCSTR", "PCTSTR", "PCWSTR", "PDWORDLONG", "PDWORD_PTR", "PDWORD32",
    "PDWORD64", "PFLOAT", "PHALF_PTR", "PHANDLE", "PHKEY", "PINT", "PINT_PTR", "PINT32",
    "PINT64", "PLCID", "PLONG", "PLONGLONG", "PLONG_PTR", "PLONG32", "PLONG64",
    "POINTER_32", "POINTER_64", "PSHORT", "PSIZE_T", "PSSIZE_T", "PSTR", "PTBYTE", "PTCHAR",
    "PTSTR", "PUCHAR", "PUHALF_PTR", "PUINT", "PUINT_PTR", "PUINT32", "PUINT64", "PULONG",
    "PULONGLONG", "PULONG_PTR", "PULONG32", "PULONG64", "PUSHORT", "PVOID", "PWCHAR",
    "PWORD", "PWSTR", "SC_HANDLE", "SC_LOCK", "SERVICE_STATUS_HANDLE", "SHORT", "SIZE_T",
    "SSIZE_T", "TBYTE", "TCHAR", "UCHAR", "UHALF_PTR", "UINT", "UINT_PTR", "UINT32",
    "UINT64", "ULONG", "ULONGLONG", "ULONG_PTR", "ULONG32", "ULONG64", "USHORT", "USN",
    "VOID", "WCHAR", "WORD", "WPARAM",
];

/// C/C++ built-in and CRT types.
const C_TYPES: &[&str] = &[
    "char", "bool", "short", "int", "__int32", "__int64", "__int8", "__int16", "long",
    "float", "double", "__wchar_t", "clock_t", "_complex", "_dev_t", "_diskfree_t", "div_t",
    "ldiv_t", "_exception", "_EXCEPTION_POINTERS", "FILE", "_finddata_t", "_finddatai64_t",
    "_wfinddata_t", "_wfinddatai64_t", "__finddata64_t", "__wfinddata64_t",
    "_FPIEEE_RECORD", "fpos_t", "_HEAPINFO", "_HFILE", "lconv", "intptr_t", "jmp_buf",
    "mbstate_t", "_off_t", "_onexit_t", "_PNH", "ptrdiff_t", "_purecall_handler",
    "sig_atomic_t", "size_t", "_stat", "__stat64", "_stati64", "terminate_function",
    "time_t", "__time64_t", "_timeb", "__timeb64", "tm", "uintptr_t", "_utimbuf", "va_list",
    "wchar_t", "wctrans_t", "wctype_t", "wint_t", "signed",
];

const KEYWORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "__finally", "__exception", "__try",
    "const_cast", "continue", "private", "public", "protected", "__declspec", "else",
    "enum", "explicit", "extern", "if", "for", "friend", "goto", "inline", "mutable",
    "naked", "namespace", "new", "noinline", "noreturn", "nothrow", "register",
    "reinterpret_cast", "return", "selectany", "sizeof", "static", "static_cast", "struct",
    "switch", "template", "this", "thread", "throw", "true", "false", "try", "typedef",
    "typeid", "typename", "union", "using", "uuid", "virtual", "void", "volatile", "while",
    "stdin",
];

const STDLIB_SYMBOLS: &[&str] = &[
    "assert", "isalnum", "isalpha", "iscntrl", "isdigit", "isgraph", "islower", "isprint",
    "ispunct", "isspace", "isupper", "isxdigit", "tolower", "toupper", "errno",
    "localeconv", "setlocale", "acos", "asin", "atan", "atan2", "ceil", "cos", "cosh",
    "exp", "fabs", "floor", "fmod", "frexp", "ldexp", "log", "log10", "modf", "pow", "sin",
    "sinh", "sqrt", "tan", "tanh", "longjmp", "setjmp", "raise", "signal", "va_arg",
    "va_end", "va_start", "clearerr", "fclose", "feof", "ferror", "fflush", "fgetc",
    "fgetpos", "fgets", "fopen", "fprintf", "fputc", "fputs", "fread", "freopen", "fscanf",
    "fseek", "fsetpos", "ftell", "fwrite", "getchar", "getch", "getc", "main", "gets",
    "perror", "printf", "putc", "putchar", "puts", "remove", "cout", "cin", "rename",
    "rewind", "scanf", "setbuf", "setvbuf", "sprintf", "sscanf", "tmpfile", "tmpnam",
    "ungetc", "vfprintf", "vprintf", "vsprintf", "abort", "abs", "atexit", "atof", "atoi",
    "atol", "bsearch", "calloc", "div", "exit", "free", "getenv", "labs", "ldiv", "malloc",
    "mblen", "mbstowcs", "mbtowc", "qsort", "rand", "realloc", "srand", "strtod", "strtol",
    "strtoul", "system", "wcstombs", "wctomb", "memchr", "memcmp", "memcpy", "memmove",
    "memset", "strcat", "strchr", "strcmp", "strcoll", "strcpy", "strcspn", "strerror",
    "strlen", "strncat", "strncmp", "strncpy", "strpbrk", "strrchr", "strspn", "strstr",
    "strtok", "strxfrm", "asctime", "clock", "ctime", "difftime", "gmtime", "localtime",
    "mktime", "strftime", "time",
];

/// Immutable lexical tables shared by the lexer and the canonicalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    operators: Vec<&'static str>,
    type_names: Vec<String>,
    type_set: HashSet<String>,
    keywords: HashSet<String>,
    stdlib_symbols: HashSet<String>,
    /// Every name, bucketed by first byte, each bucket longest-first.
    name_index: HashMap<u8, Vec<String>>,
}

impl Vocabulary {
    /// The C/C++ vocabulary (Windows typedefs, CRT types, C++ keywords, libc symbols).
    pub fn c_family() -> Self {
        let mut type_names: Vec<String> = Vec::with_capacity(PLATFORM_TYPES.len() + C_TYPES.len());
        let mut type_set = HashSet::with_capacity(type_names.capacity());
        for name in PLATFORM_TYPES.iter().chain(C_TYPES.iter()) {
            if type_set.insert((*name).to_string()) {
                type_names.push((*name).to_string());
            }
        }

        // Precedence is type > keyword > stdlib symbol; the sets stay disjoint.
        let keywords: HashSet<String> = KEYWORDS
            .iter()
            .filter(|name| !type_set.contains(**name))
            .map(|name| (*name).to_string())
            .collect();
        let stdlib_symbols: HashSet<String> = STDLIB_SYMBOLS
            .iter()
            .filter(|name| !type_set.contains(**name) && !keywords.contains(**name))
            .map(|name| (*name).to_string())
            .collect();

        let mut operators = OPERATORS.to_vec();
        operators.sort_by(|a, b| b.len().cmp(&a.len()));

        let mut vocab = Self {
            operators,
            type_names,
            type_set,
            keywords,
            stdlib_symbols,
            name_index: HashMap::new(),
        };
        vocab.rebuild_name_index();
        vocab
    }

    fn rebuild_name_index(&mut self) {
        let mut index: HashMap<u8, Vec<String>> = HashMap::new();
        let names = self
            .type_names
            .iter()
            .chain(self.keywords.iter())
            .chain(self.stdlib_symbols.iter());
        for name in names {
            if let Some(first) = name.as_bytes().first() {
                index.entry(*first).or_default().push(name.clone());
            }
        }
        for bucket in index.values_mut() {
            // Length first, then text, so the bucket order never depends on hashing.
            bucket.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        }
        self.name_index = index;
    }

    /// Process-wide instance, initialised on first use and never mutated.
    pub fn shared() -> &'static Vocabulary {
        static SHARED: OnceLock<Vocabulary> = OnceLock::new();
        SHARED.get_or_init(Vocabulary::c_family)
    }

    /// Returns a copy of this vocabulary with additional type names.
    ///
    /// Names already known as keywords or stdlib symbols are moved to the type
    /// set so the name sets remain disjoint.
    pub fn with_extra_types<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if name.is_empty() || self.type_set.contains(&name) {
                continue;
            }
            self.keywords.remove(&name);
            self.stdlib_symbols.remove(&name);
            self.type_set.insert(name.clone());
            self.type_names.push(name);
        }
        self.rebuild_name_index();
        self
    }

    /// Classify a whole word (no operator characters) by exact lookup.
    pub fn classify_word(&self, word: &str) -> TokenKind {
        if self.type_set.contains(word) {
            TokenKind::Type
        } else if self.keywords.contains(word) {
            TokenKind::Keyword
        } else if self.stdlib_symbols.contains(word) {
            TokenKind::StdlibSymbol
        } else {
            TokenKind::Identifier
        }
    }

    /// Longest operator that `text` starts with, if any.
    pub fn operator_at<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.operators
            .iter()
            .find(|op| text.starts_with(**op))
            .map(|op| &text[..op.len()])
    }

    /// Longest type, keyword or stdlib name that `text` starts with, if any.
    ///
    /// No word-boundary check: `point` yields nothing at `p` but `int` at `i`.
    pub fn name_at<'a>(&self, text: &'a str) -> Option<&'a str> {
        let first = text.as_bytes().first()?;
        self.name_index
            .get(first)?
            .iter()
            .find(|name| text.starts_with(name.as_str()))
            .map(|name| &text[..name.len()])
    }

    /// True if `text` begins with any type name.
    ///
    /// This is deliberately a prefix test: `integer` and `tmp` both match
    /// (via `int` and `tm`).
    pub fn is_type_prefixed(&self, text: &str) -> bool {
        self.type_names.iter().any(|name| text.starts_with(name.as_str()))
    }

    pub fn is_type(&self, word: &str) -> bool {
        self.type_set.contains(word)
    }

    pub fn operators(&self) -> &[&'static str] {
        &self.operators
    }

    pub fn type_names(&self) -> &[String] {
        &self.type_names
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::c_family()
    }
}

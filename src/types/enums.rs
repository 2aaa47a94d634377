//! Closed sets of wire strings.
//!
//! Every type here encodes to exactly its wire string and refuses anything
//! outside the set with [`UnknownEnumValue`].

/// Declares a constrained-string enum.
///
/// The generated type gets `as_str`, `ALL`, `FromStr`, `Display` and serde
/// impls that go through the wire string. Deserialization of an unlisted value
/// fails with an [`UnknownEnumValue`](crate::types::UnknownEnumValue) message.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::types::UnknownEnumValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err($crate::types::UnknownEnumValue {
                        kind: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

string_enum! {
    /// Display format of a number property.
    #[derive(Default)]
    pub enum NumberFormat {
        #[default]
        Number => "number",
        NumberWithCommas => "number_with_commas",
        Percent => "percent",
        Dollar => "dollar",
        CanadianDollar => "canadian_dollar",
        Euro => "euro",
        Pound => "pound",
        Yen => "yen",
        Ruble => "ruble",
        Rupee => "rupee",
        Won => "won",
        Yuan => "yuan",
        Real => "real",
        Lira => "lira",
        Rupiah => "rupiah",
        Franc => "franc",
        HongKongDollar => "hong_kong_dollar",
        NewZealandDollar => "new_zealand_dollar",
        Krona => "krona",
        NorwegianKrone => "norwegian_krone",
        MexicanPeso => "mexican_peso",
        Rand => "rand",
        NewTaiwanDollar => "new_taiwan_dollar",
        DanishKrone => "danish_krone",
        Zloty => "zloty",
        Baht => "baht",
        Forint => "forint",
        Koruna => "koruna",
        Shekel => "shekel",
        ChileanPeso => "chilean_peso",
        PhilippinePeso => "philippine_peso",
        Dirham => "dirham",
        ColombianPeso => "colombian_peso",
        Riyal => "riyal",
        Ringgit => "ringgit",
        Leu => "leu",
    }
}

string_enum! {
    /// Aggregation applied by a rollup property.
    pub enum RollupFunction {
        CountAll => "count_all",
        CountValues => "count_values",
        CountUniqueValues => "count_unique_values",
        CountEmpty => "count_empty",
        CountNotEmpty => "count_not_empty",
        PercentEmpty => "percent_empty",
        PercentNotEmpty => "percent_not_empty",
        Sum => "sum",
        Average => "average",
        Median => "median",
        Min => "min",
        Max => "max",
        Range => "range",
        ShowOriginal => "show_original",
        DateRange => "date_range",
    }
}

string_enum! {
    /// Syntax highlighting language of a code block.
    pub enum CodeLanguage {
        Abap => "abap",
        Arduino => "arduino",
        Bash => "bash",
        Basic => "basic",
        C => "c",
        Clojure => "clojure",
        Coffeescript => "coffeescript",
        Cpp => "c++",
        CSharp => "c#",
        Css => "css",
        Dart => "dart",
        Diff => "diff",
        Docker => "docker",
        Elixir => "elixir",
        Elm => "elm",
        Erlang => "erlang",
        Flow => "flow",
        Fortran => "fortran",
        FSharp => "f#",
        Gherkin => "gherkin",
        Glsl => "glsl",
        Go => "go",
        Graphql => "graphql",
        Groovy => "groovy",
        Haskell => "haskell",
        Html => "html",
        Java => "java",
        Javascript => "javascript",
        Json => "json",
        Julia => "julia",
        Kotlin => "kotlin",
        Latex => "latex",
        Less => "less",
        Lisp => "lisp",
        Livescript => "livescript",
        Lua => "lua",
        Makefile => "makefile",
        Markdown => "markdown",
        Markup => "markup",
        Matlab => "matlab",
        Mermaid => "mermaid",
        Nix => "nix",
        ObjectiveC => "objective-c",
        Ocaml => "ocaml",
        Pascal => "pascal",
        Perl => "perl",
        Php => "php",
        PlainText => "plain text",
        Powershell => "powershell",
        Prolog => "prolog",
        Protobuf => "protobuf",
        Python => "python",
        R => "r",
        Reason => "reason",
        Ruby => "ruby",
        Rust => "rust",
        Sass => "sass",
        Scala => "scala",
        Scheme => "scheme",
        Scss => "scss",
        Shell => "shell",
        Sql => "sql",
        Swift => "swift",
        Typescript => "typescript",
        VbNet => "vb.net",
        Verilog => "verilog",
        Vhdl => "vhdl",
        VisualBasic => "visual basic",
        Webassembly => "webassembly",
        Xml => "xml",
        Yaml => "yaml",
        JavaCCppCSharp => "java/c/c++/c#",
    }
}

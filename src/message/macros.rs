//! Declarative helpers shared by the message families.

/// Declare a family enum with one variant per concrete message type.
///
/// Generates `From` conversions from every concrete type, an `as_view`
/// accessor returning the variant as a trait object, and a
/// [`MessageKind`](crate::message::MessageKind) impl that delegates to it.
macro_rules! message_family {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $view:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident($ty:ty),
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant($ty),
            )+
        }

        $(
            impl From<$ty> for $name {
                fn from(message: $ty) -> Self {
                    $name::$variant(message)
                }
            }
        )+

        impl $name {
            /// Borrow the concrete message behind this variant.
            pub fn as_view(&self) -> &dyn $view {
                match self {
                    $( $name::$variant(m) => m, )+
                }
            }
        }

        impl $crate::message::MessageKind for $name {
            fn to_tokens(&self) -> Vec<String> {
                self.as_view().to_tokens()
            }

            fn targets(&self) -> Vec<&str> {
                self.as_view().targets()
            }

            fn is_conversation(&self) -> bool {
                self.as_view().is_conversation()
            }
        }
    };
}

/// Declare numeric replies whose shape is `<target> <fields...> [:text]`.
///
/// Missing fields parse as empty strings. The last parameter past the named
/// fields is `text`; any between them are kept in order in `extra`.
/// `channel = field` marks the field that names the channel the reply is
/// about; `text = "..."` gives the default text used by `new`.
macro_rules! numeric_reply {
    ($(
        $(#[$meta:meta])*
        $name:ident = $code:literal { $($field:ident),* }
        $(channel = $chan:ident,)?
        $(text = $text:literal,)?
    ;)+) => {$(
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name {
            /// Client the reply is addressed to.
            pub target: String,
            $( pub $field: String, )*
            /// Parameters between the named fields and the text.
            pub extra: Vec<String>,
            /// Trailing human-readable text.
            pub text: Option<String>,
        }

        impl $name {
            /// Build the reply with its default text.
            pub fn new(target: impl Into<String> $(, $field: impl Into<String>)*) -> Self {
                $name {
                    target: target.into(),
                    $( $field: $field.into(), )*
                    extra: Vec::new(),
                    text: None $(.or(Some($text.to_owned())))?,
                }
            }

            /// Replace the trailing text.
            pub fn with_text(mut self, text: impl Into<String>) -> Self {
                self.text = Some(text.into());
                self
            }
        }

        impl $crate::message::NumericKind for $name {
            const CODE: u16 = $code;
        }

        impl $crate::message::MessageKind for $name {
            fn to_tokens(&self) -> Vec<String> {
                let mut tokens = vec![
                    format!("{:03}", <Self as $crate::message::NumericKind>::CODE),
                    self.target.clone(),
                    $( self.$field.clone(), )*
                ];
                tokens.extend(self.extra.iter().cloned());
                tokens.extend(self.text.clone());
                tokens
            }

            fn targets(&self) -> Vec<&str> {
                vec![$( self.$chan.as_str() )?]
            }
        }

        impl $crate::message::NumericReply for $name {
            fn code(&self) -> u16 {
                <Self as $crate::message::NumericKind>::CODE
            }

            fn target(&self) -> &str {
                &self.target
            }
        }

        impl $crate::message::ParseMessage for $name {
            fn can_parse(line: &$crate::line::ParsedLine) -> bool {
                line.numeric() == Some(<Self as $crate::message::NumericKind>::CODE)
            }

            fn parse(
                line: &$crate::line::ParsedLine,
            ) -> Result<Self, $crate::error::MessageParseError> {
                let mut params = line.parameters.iter();
                let target = params.next().cloned().unwrap_or_default();
                $( let $field = params.next().cloned().unwrap_or_default(); )*
                let mut extra: Vec<String> = params.cloned().collect();
                let text = extra.pop();
                Ok($name {
                    target,
                    $( $field, )*
                    extra,
                    text,
                })
            }
        }
    )+};
}

use crate::{Error, Result, Value, quote_cow};
use proc_macro2::TokenStream;
use quote::{ToTokens, TokenStreamExt, quote};
use std::borrow::Cow;

/// Parsed `where` tag: `column[,operator][,omitempty]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub column: Cow<'static, str>,
    /// Written verbatim between the column and the placeholder.
    pub operator: Cow<'static, str>,
    pub omitempty: bool,
}

/// Shape of the argument bound to a condition, selected from the operator text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// The raw value.
    Compare,
    /// `%value%`, for operators containing `like`.
    Contains,
    /// `%value`, for operators containing `plike`.
    Suffix,
    /// `value%`, for operators containing `slike`.
    Prefix,
}

impl Pattern {
    pub fn of(operator: &str) -> Self {
        if operator.contains("plike") {
            Pattern::Suffix
        } else if operator.contains("slike") {
            Pattern::Prefix
        } else if operator.contains("like") {
            Pattern::Contains
        } else {
            Pattern::Compare
        }
    }

    pub fn bind(&self, value: &Value) -> Value {
        match self {
            Pattern::Compare => value.clone(),
            Pattern::Contains => Value::Varchar(Some(format!("%{}%", value))),
            Pattern::Suffix => Value::Varchar(Some(format!("%{}", value))),
            Pattern::Prefix => Value::Varchar(Some(format!("{}%", value))),
        }
    }
}

/// One rendered condition: `<column> <operator> <placeholder>` and its argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: Cow<'static, str>,
    pub operator: Cow<'static, str>,
    pub argument: Value,
}

impl Condition {
    pub const DEFAULT_OPERATOR: &'static str = "=";

    pub fn parse(raw: &str) -> Result<Self> {
        let mut parts = raw.splitn(3, ',');
        let column = parts.next().unwrap_or_default().trim();
        if column.is_empty() {
            return Err(Error::msg("where column can not be empty"));
        }
        let (operator, omitempty) = match (parts.next(), parts.next()) {
            (None, _) => (Self::DEFAULT_OPERATOR, false),
            (Some("omitempty"), None) => (Self::DEFAULT_OPERATOR, true),
            (Some(operator), None) => (operator, false),
            (Some(operator), Some("omitempty")) => (operator, true),
            (Some(..), Some(option)) => {
                return Err(Error::msg(format!(
                    "where option `{}` is not recognized, expected `omitempty`",
                    option
                )));
            }
        };
        let operator = match operator.trim() {
            "" => Self::DEFAULT_OPERATOR,
            v => v,
        };
        Ok(Self {
            column: column.to_string().into(),
            operator: operator.to_string().into(),
            omitempty,
        })
    }

    pub fn pattern(&self) -> Pattern {
        Pattern::of(&self.operator)
    }

    /// Predicate for the field value, `None` when the condition is omitted.
    pub fn predicate(&self, value: &Value) -> Option<Predicate> {
        if self.omitempty && value.is_zero() {
            return None;
        }
        Some(Predicate {
            column: self.column.clone(),
            operator: self.operator.clone(),
            argument: self.pattern().bind(value),
        })
    }
}

impl ToTokens for Condition {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let column = quote_cow(&self.column);
        let operator = quote_cow(&self.operator);
        let omitempty = self.omitempty;
        tokens.append_all(quote! {
            ::tagsql::Condition {
                column: #column,
                operator: #operator,
                omitempty: #omitempty,
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::{Condition, Pattern};
    use crate::Value;

    #[test]
    fn parse_defaults() {
        let condition = Condition::parse("id").unwrap();
        assert_eq!(condition.column, "id");
        assert_eq!(condition.operator, "=");
        assert!(!condition.omitempty);

        let condition = Condition::parse("id,>=").unwrap();
        assert_eq!(condition.operator, ">=");
        assert!(!condition.omitempty);

        let condition = Condition::parse("id,omitempty").unwrap();
        assert_eq!(condition.operator, "=");
        assert!(condition.omitempty);

        let condition = Condition::parse("id,,omitempty").unwrap();
        assert_eq!(condition.operator, "=");
        assert!(condition.omitempty);

        let condition = Condition::parse("name,not like,omitempty").unwrap();
        assert_eq!(condition.operator, "not like");
        assert!(condition.omitempty);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            Condition::parse("").unwrap_err().to_string(),
            "where column can not be empty"
        );
        assert_eq!(
            Condition::parse(",=").unwrap_err().to_string(),
            "where column can not be empty"
        );
        assert!(Condition::parse("id,=,always").is_err());
    }

    #[test]
    fn pattern_dispatch() {
        assert_eq!(Pattern::of("="), Pattern::Compare);
        assert_eq!(Pattern::of("like"), Pattern::Contains);
        assert_eq!(Pattern::of("not like"), Pattern::Contains);
        assert_eq!(Pattern::of("plike"), Pattern::Suffix);
        assert_eq!(Pattern::of("slike"), Pattern::Prefix);

        let john = Value::Varchar(Some("John".into()));
        assert_eq!(
            Pattern::Contains.bind(&john),
            Value::Varchar(Some("%John%".into()))
        );
        assert_eq!(
            Pattern::Suffix.bind(&john),
            Value::Varchar(Some("%John".into()))
        );
        assert_eq!(
            Pattern::Prefix.bind(&john),
            Value::Varchar(Some("John%".into()))
        );
        assert_eq!(Pattern::Compare.bind(&john), john);
    }

    #[test]
    fn omitted_predicate() {
        let condition = Condition::parse("id,=,omitempty").unwrap();
        assert!(condition.predicate(&Value::Int32(Some(0))).is_none());
        let predicate = condition.predicate(&Value::Int32(Some(1))).unwrap();
        assert_eq!(predicate.argument, Value::Int32(Some(1)));

        let condition = Condition::parse("id").unwrap();
        let predicate = condition.predicate(&Value::Int32(Some(0))).unwrap();
        assert_eq!(predicate.argument, Value::Int32(Some(0)));
    }
}

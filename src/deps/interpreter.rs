//! Evaluation of parsed DEPS programs.
//!
//! Statements run top to bottom. Each assignment lands in the local scope, so
//! `Var(...)` only sees a `vars` mapping that was assigned earlier in the file.
//! The global scope contributes the empty `deps_os` mapping gclient provides.

use super::lexer::{Lexer, Position};
use super::parser::{Expr, ExprKind, Parser, Statement};
use super::resolver::{PlatformDefaults, VariableResolver};
use super::value::{DepsMap, DepsValue};
use super::{DepsFile, SyntaxError};
use crate::core::{FlattenError, Result};
use tracing::{debug, trace};

/// Top-level names that must hold a mapping when assigned.
const MAPPING_NAMES: &[&str] = &["vars", "deps", "deps_os"];

/// Evaluates DEPS source text into a [`DepsFile`].
///
/// # Examples
///
/// ```rust
/// use deps_flatten::deps::{DepsInterpreter, PlatformDefaults};
///
/// let defaults = PlatformDefaults::default();
/// let deps = DepsInterpreter::new(&defaults)
///     .evaluate("deps = {'src/a': 'https://example.com/a.git' + '@' + Var('host_os')}")
///     .unwrap();
/// assert_eq!(deps.filtered_deps(), vec!["https://example.com/a.git@linux".to_string()]);
/// ```
pub struct DepsInterpreter<'a> {
    defaults: &'a PlatformDefaults,
    source_name: String,
}

impl<'a> DepsInterpreter<'a> {
    #[must_use]
    pub fn new(defaults: &'a PlatformDefaults) -> Self {
        Self {
            defaults,
            source_name: "DEPS".to_string(),
        }
    }

    /// Name used for the source in parse diagnostics.
    #[must_use]
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    /// Lexes, parses and evaluates `source`.
    ///
    /// # Errors
    ///
    /// - [`FlattenError::ConfigParseError`] for syntax errors, unsupported
    ///   expression shapes and type errors
    /// - [`FlattenError::UnresolvedVariable`] for a `Var(...)` that cannot be resolved
    pub fn evaluate(&self, source: &str) -> Result<DepsFile> {
        let tokens = Lexer::new(source).tokenize().map_err(|e| self.parse_error(e))?;
        trace!("Lexed {} tokens from {}", tokens.len(), self.source_name);
        let program = Parser::new(tokens).parse_program().map_err(|e| self.parse_error(e))?;
        self.run(&program)
    }

    fn run(&self, program: &[Statement]) -> Result<DepsFile> {
        let mut local_scope = DepsMap::new();

        for statement in program {
            let value = self.eval(&statement.value, &local_scope)?;
            if MAPPING_NAMES.contains(&statement.target.as_str()) && value.as_map().is_none() {
                return Err(self.parse_error(SyntaxError::new(
                    statement.pos,
                    format!("'{}' must be a mapping, found {}", statement.target, value.type_name()),
                )));
            }
            debug!("Assigned '{}' ({})", statement.target, value.type_name());
            local_scope.insert(statement.target.clone(), value);
        }

        Ok(DepsFile::from_scope(local_scope))
    }

    fn eval(&self, expr: &Expr, scope: &DepsMap) -> Result<DepsValue> {
        match &expr.kind {
            ExprKind::Str(s) => Ok(DepsValue::Str(s.clone())),
            ExprKind::Int(i) => Ok(DepsValue::Int(*i)),
            ExprKind::Bool(b) => Ok(DepsValue::Bool(*b)),
            ExprKind::None => Ok(DepsValue::None),
            ExprKind::List(items) => items
                .iter()
                .map(|item| self.eval(item, scope))
                .collect::<Result<Vec<_>>>()
                .map(DepsValue::List),
            ExprKind::Map(entries) => {
                let mut map = DepsMap::new();
                for (key_expr, value_expr) in entries {
                    let key = match self.eval(key_expr, scope)? {
                        DepsValue::Str(key) => key,
                        other => {
                            return Err(self.type_error(
                                key_expr.pos,
                                format!("mapping keys must be strings, found {}", other.type_name()),
                            ));
                        }
                    };
                    let value = self.eval(value_expr, scope)?;
                    map.insert(key, value);
                }
                Ok(DepsValue::Map(map))
            }
            ExprKind::Concat {
                first,
                rest,
            } => {
                let mut acc = self.eval(first, scope)?;
                for (pos, operand) in rest {
                    let rhs = self.eval(operand, scope)?;
                    acc = self.concat(acc, rhs, *pos)?;
                }
                Ok(acc)
            }
            ExprKind::Var(argument) => {
                let name = match self.eval(argument, scope)? {
                    DepsValue::Str(name) => name,
                    other => {
                        return Err(self.type_error(
                            argument.pos,
                            format!("Var() expects a string, found {}", other.type_name()),
                        ));
                    }
                };
                let value = VariableResolver::new(scope, self.defaults).lookup(&name)?;
                trace!("Var('{name}') -> {value}");
                Ok(value)
            }
        }
    }

    fn concat(&self, lhs: DepsValue, rhs: DepsValue, pos: Position) -> Result<DepsValue> {
        match (lhs, rhs) {
            (DepsValue::Str(mut a), DepsValue::Str(b)) => {
                a.push_str(&b);
                Ok(DepsValue::Str(a))
            }
            (DepsValue::List(mut a), DepsValue::List(b)) => {
                a.extend(b);
                Ok(DepsValue::List(a))
            }
            (a, b) => Err(self.type_error(
                pos,
                format!(
                    "unsupported operand types for +: '{}' and '{}'",
                    a.type_name(),
                    b.type_name()
                ),
            )),
        }
    }

    fn type_error(&self, pos: Position, reason: String) -> FlattenError {
        self.parse_error(SyntaxError::new(pos, reason))
    }

    fn parse_error(&self, error: SyntaxError) -> FlattenError {
        error.into_flatten_error(&self.source_name)
    }
}

//! Selective evaluator for configuration scripts.
//!
//! Walks the parsed statement list against a flat, module-scoped symbol
//! table. Only the configuration subset is evaluated: module requires,
//! config-object construction, assignments of literal-ish expressions,
//! and a small table of builtins (`font`, `font_with_fallback`,
//! `action.<Name>`, `color.parse`). Everything else is preserved verbatim
//! as a [`Fragment`], never rejected.

use std::collections::HashMap;

use crate::emit::format_number;
use crate::error::LuaError;
use crate::parser::{Expr, Stmt, StmtKind, TableItem, parse};

/// A font request with optional variant and shaping data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FontSpec {
    pub family: String,
    pub weight: Option<String>,
    pub style: Option<String>,
    pub fallbacks: Vec<String>,
    pub features: Vec<String>,
}

impl FontSpec {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            ..Default::default()
        }
    }
}

/// A key assignment action, e.g. `SpawnTab("CurrentPaneDomain")`.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionSpec {
    pub name: String,
    pub args: Vec<Value>,
}

/// Evaluated value of a supported expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    Str(String),
    /// Table with only positional items.
    Array(Vec<Value>),
    /// Table with named items, insertion-ordered.
    Table(Vec<(String, Value)>),
    Font(FontSpec),
    Action(ActionSpec),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Table field lookup by key; `None` for non-tables too.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Table(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }
}

/// A statement kept verbatim for same-terminal round-trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub line: usize,
    pub text: String,
}

/// The evaluated form of a configuration script: an ordered map from
/// dotted setting path to value, plus the verbatim remainder.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScriptModule {
    settings: Vec<(String, Value)>,
    pub fragments: Vec<Fragment>,
}

impl ScriptModule {
    /// Set a dotted-path setting; a later assignment to the same path
    /// overwrites in place, keeping the original position.
    pub fn set(&mut self, path: impl Into<String>, value: Value) {
        let path = path.into();
        if let Some(slot) = self.settings.iter_mut().find(|(k, _)| *k == path) {
            slot.1 = value;
        } else {
            self.settings.push((path, value));
        }
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.settings
            .iter()
            .find(|(k, _)| k == path)
            .map(|(_, v)| v)
    }

    /// Remove and return a setting, if present.
    pub fn take(&mut self, path: &str) -> Option<Value> {
        let index = self.settings.iter().position(|(k, _)| k == path)?;
        Some(self.settings.remove(index).1)
    }

    pub fn settings(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.settings.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Settings remaining after adapter consumption, by value.
    pub fn into_settings(self) -> Vec<(String, Value)> {
        self.settings
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty() && self.fragments.is_empty()
    }
}

/// Parse and evaluate a configuration script.
///
/// Fails only on structurally fatal source; every recoverable problem
/// lands in [`ScriptModule::fragments`] instead.
pub fn parse_module(source: &str) -> Result<ScriptModule, LuaError> {
    let stmts = parse(source)?;
    Ok(Evaluator::new(source).run(stmts))
}

/// What a module-scope identifier is bound to.
enum Binding {
    /// A required scripting module (e.g. the result of `require`).
    Module,
    /// The config object under construction.
    ConfigObject,
    /// A plain evaluated value.
    Value(Value),
}

/// Recoverable evaluation failure; the enclosing statement becomes a
/// fragment. Wraps [`LuaError::UnresolvedReference`] and unknown-builtin
/// cases alike.
struct EvalFail;

struct Evaluator<'a> {
    source: &'a str,
    scope: HashMap<String, Binding>,
}

impl<'a> Evaluator<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            scope: HashMap::new(),
        }
    }

    fn run(mut self, stmts: Vec<Stmt>) -> ScriptModule {
        let mut module = ScriptModule::default();
        for stmt in stmts {
            if let Err(EvalFail) = self.statement(&stmt, &mut module) {
                self.capture(&stmt, &mut module);
            }
        }
        module
    }

    fn capture(&self, stmt: &Stmt, module: &mut ScriptModule) {
        let text = self.source[stmt.start..stmt.end].to_string();
        log::debug!("keeping statement at line {} verbatim", stmt.line);
        module.fragments.push(Fragment {
            line: stmt.line,
            text,
        });
    }

    fn statement(&mut self, stmt: &Stmt, module: &mut ScriptModule) -> Result<(), EvalFail> {
        match &stmt.kind {
            StmtKind::Local { name, value } => self.local(name, value),
            StmtKind::Assign { target, value } => self.assign(target, value, module),
            // The trailing `return config` carries no settings.
            StmtKind::Return { name } => {
                if matches!(self.scope.get(name), Some(Binding::ConfigObject)) {
                    Ok(())
                } else {
                    Err(EvalFail)
                }
            }
            // Bare calls (callback registration, unknown custom calls)
            // are never evaluated.
            StmtKind::ExprStmt(_) | StmtKind::Opaque => Err(EvalFail),
        }
    }

    fn local(&mut self, name: &str, value: &Expr) -> Result<(), EvalFail> {
        match value {
            // `local wezterm = require("wezterm")`
            Expr::Call { callee, args }
                if callee.len() == 1 && callee[0] == "require" && args.len() == 1 =>
            {
                self.scope.insert(name.to_string(), Binding::Module);
                Ok(())
            }
            // `local config = wezterm.config_builder()`
            Expr::Call { callee, args }
                if callee.len() == 2
                    && callee[1] == "config_builder"
                    && args.is_empty()
                    && self.is_module(&callee[0]) =>
            {
                self.scope.insert(name.to_string(), Binding::ConfigObject);
                Ok(())
            }
            // `local config = {}`
            Expr::Table(items) if items.is_empty() => {
                self.scope.insert(name.to_string(), Binding::ConfigObject);
                Ok(())
            }
            other => {
                let value = self.eval(other)?;
                self.scope.insert(name.to_string(), Binding::Value(value));
                Ok(())
            }
        }
    }

    fn assign(
        &mut self,
        target: &[String],
        value: &Expr,
        module: &mut ScriptModule,
    ) -> Result<(), EvalFail> {
        let (root, path) = target.split_first().ok_or(EvalFail)?;
        if !matches!(self.scope.get(root), Some(Binding::ConfigObject)) {
            return Err(EvalFail);
        }
        let value = self.eval(value)?;
        module.set(path.join("."), value);
        Ok(())
    }

    fn is_module(&self, name: &str) -> bool {
        matches!(self.scope.get(name), Some(Binding::Module))
    }

    fn eval(&self, expr: &Expr) -> Result<Value, EvalFail> {
        match expr {
            Expr::Nil => Ok(Value::Nil),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),
            Expr::Ident(name) => match self.scope.get(name) {
                Some(Binding::Value(value)) => Ok(value.clone()),
                _ => Err(EvalFail),
            },
            Expr::Path(path) => self.builtin_path(path),
            Expr::Call { callee, args } => self.builtin_call(callee, args),
            Expr::Table(items) => self.table(items),
            Expr::Neg(inner) => match self.eval(inner)? {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(EvalFail),
            },
            Expr::Concat(left, right) => {
                let mut text = self.stringify(left)?;
                text.push_str(&self.stringify(right)?);
                Ok(Value::Str(text))
            }
        }
    }

    fn stringify(&self, expr: &Expr) -> Result<String, EvalFail> {
        match self.eval(expr)? {
            Value::Str(s) => Ok(s),
            Value::Number(n) => Ok(format_number(n)),
            _ => Err(EvalFail),
        }
    }

    /// `mod.action.Name` without arguments.
    fn builtin_path(&self, path: &[String]) -> Result<Value, EvalFail> {
        match path {
            [module, group, name] if group == "action" && self.is_module(module) => {
                Ok(Value::Action(ActionSpec {
                    name: name.clone(),
                    args: Vec::new(),
                }))
            }
            _ => Err(EvalFail),
        }
    }

    fn builtin_call(&self, callee: &[String], args: &[Expr]) -> Result<Value, EvalFail> {
        match callee {
            [module, name] if self.is_module(module) => match name.as_str() {
                "font" => self.font(args),
                "font_with_fallback" => self.font_with_fallback(args),
                _ => Err(EvalFail),
            },
            [module, group, name] if group == "action" && self.is_module(module) => {
                let args = args
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Action(ActionSpec {
                    name: name.clone(),
                    args,
                }))
            }
            [module, group, name]
                if group == "color" && name == "parse" && self.is_module(module) =>
            {
                match args {
                    [Expr::Str(s)] => Ok(Value::Str(s.clone())),
                    _ => Err(EvalFail),
                }
            }
            _ => Err(EvalFail),
        }
    }

    /// `mod.font("family")` or `mod.font("family", { weight = …, … })`.
    fn font(&self, args: &[Expr]) -> Result<Value, EvalFail> {
        let (family, opts) = match args {
            [Expr::Str(family)] => (family.clone(), None),
            [Expr::Str(family), opts @ Expr::Table(_)] => {
                (family.clone(), Some(self.eval(opts)?))
            }
            _ => return Err(EvalFail),
        };
        let mut spec = FontSpec::new(family);
        if let Some(opts) = opts {
            self.apply_font_opts(&mut spec, &opts)?;
        }
        Ok(Value::Font(spec))
    }

    /// `mod.font_with_fallback({ "primary", "fallback", … }, opts?)`.
    /// Entries may themselves be `{ family = "…" }` tables.
    fn font_with_fallback(&self, args: &[Expr]) -> Result<Value, EvalFail> {
        let (list, opts) = match args {
            [list @ Expr::Table(_)] => (self.eval(list)?, None),
            [list @ Expr::Table(_), opts @ Expr::Table(_)] => {
                (self.eval(list)?, Some(self.eval(opts)?))
            }
            _ => return Err(EvalFail),
        };
        let Value::Array(entries) = list else {
            return Err(EvalFail);
        };
        let mut families = Vec::new();
        for entry in entries {
            match entry {
                Value::Str(family) => families.push(family),
                Value::Table(_) => match entry.get("family") {
                    Some(Value::Str(family)) => families.push(family.clone()),
                    _ => return Err(EvalFail),
                },
                _ => return Err(EvalFail),
            }
        }
        let mut families = families.into_iter();
        let mut spec = FontSpec::new(families.next().ok_or(EvalFail)?);
        spec.fallbacks = families.collect();
        if let Some(opts) = opts {
            self.apply_font_opts(&mut spec, &opts)?;
        }
        Ok(Value::Font(spec))
    }

    fn apply_font_opts(&self, spec: &mut FontSpec, opts: &Value) -> Result<(), EvalFail> {
        let Value::Table(entries) = opts else {
            return Err(EvalFail);
        };
        for (key, value) in entries {
            match (key.as_str(), value) {
                ("weight", Value::Str(weight)) => spec.weight = Some(weight.clone()),
                ("style", Value::Str(style)) => spec.style = Some(style.clone()),
                ("italic", Value::Bool(true)) => spec.style = Some("Italic".to_string()),
                ("italic", Value::Bool(false)) => {}
                ("harfbuzz_features", Value::Array(features)) => {
                    spec.features = features
                        .iter()
                        .map(|f| f.as_str().map(str::to_string).ok_or(EvalFail))
                        .collect::<Result<Vec<_>, _>>()?;
                }
                _ => return Err(EvalFail),
            }
        }
        Ok(())
    }

    fn table(&self, items: &[TableItem]) -> Result<Value, EvalFail> {
        let all_positional = items
            .iter()
            .all(|item| matches!(item, TableItem::Positional(_)));
        if all_positional && !items.is_empty() {
            let values = items
                .iter()
                .map(|item| match item {
                    TableItem::Positional(expr) => self.eval(expr),
                    _ => Err(EvalFail),
                })
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Value::Array(values));
        }
        let mut entries = Vec::new();
        for item in items {
            match item {
                TableItem::Named { key, value } => {
                    entries.push((key.clone(), self.eval(value)?));
                }
                TableItem::Keyed { key, value } => match key {
                    Expr::Str(key) => entries.push((key.clone(), self.eval(value)?)),
                    _ => return Err(EvalFail),
                },
                // Mixed positional/named tables are outside the subset.
                TableItem::Positional(_) => return Err(EvalFail),
            }
        }
        Ok(Value::Table(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROLOGUE: &str =
        "local wezterm = require 'wezterm'\nlocal config = wezterm.config_builder()\n";

    fn eval(body: &str) -> ScriptModule {
        parse_module(&format!("{PROLOGUE}{body}\nreturn config\n")).unwrap()
    }

    #[test]
    fn test_scalar_assignments() {
        let module = eval("config.font_size = 14.0\nconfig.enable_tab_bar = false");
        assert_eq!(module.get("font_size"), Some(&Value::Number(14.0)));
        assert_eq!(module.get("enable_tab_bar"), Some(&Value::Bool(false)));
        assert!(module.fragments.is_empty());
    }

    #[test]
    fn test_nested_path_assignment() {
        let module = eval("config.window_padding.left = 4");
        assert_eq!(module.get("window_padding.left"), Some(&Value::Number(4.0)));
    }

    #[test]
    fn test_colors_table() {
        let module = eval("config.colors = { foreground = '#c5c8c6', ansi = { '#000000', '#cc6666' } }");
        let colors = module.get("colors").unwrap();
        assert_eq!(
            colors.get("foreground"),
            Some(&Value::Str("#c5c8c6".into()))
        );
        let Some(Value::Array(ansi)) = colors.get("ansi") else {
            panic!("expected ansi array");
        };
        assert_eq!(ansi.len(), 2);
    }

    #[test]
    fn test_font_builtin() {
        let module = eval(
            "config.font = wezterm.font('JetBrains Mono', { weight = 'Bold', harfbuzz_features = { 'calt=0' } })",
        );
        let Some(Value::Font(spec)) = module.get("font") else {
            panic!("expected font value");
        };
        assert_eq!(spec.family, "JetBrains Mono");
        assert_eq!(spec.weight.as_deref(), Some("Bold"));
        assert_eq!(spec.features, ["calt=0"]);
    }

    #[test]
    fn test_font_with_fallback() {
        let module = eval(
            "config.font = wezterm.font_with_fallback({ 'Fira Code', { family = 'Noto Color Emoji' } })",
        );
        let Some(Value::Font(spec)) = module.get("font") else {
            panic!("expected font value");
        };
        assert_eq!(spec.family, "Fira Code");
        assert_eq!(spec.fallbacks, ["Noto Color Emoji"]);
    }

    #[test]
    fn test_action_builtin() {
        let module = eval(
            "config.keys = { { key = 'c', mods = 'CTRL|SHIFT', action = wezterm.action.CopyTo 'Clipboard' } }",
        );
        let Some(Value::Array(keys)) = module.get("keys") else {
            panic!("expected keys array");
        };
        let Some(Value::Action(action)) = keys[0].get("action") else {
            panic!("expected action value");
        };
        assert_eq!(action.name, "CopyTo");
        assert_eq!(action.args, [Value::Str("Clipboard".into())]);
    }

    #[test]
    fn test_bare_action_path() {
        let module = eval(
            "config.keys = { { key = 'v', mods = 'CTRL', action = wezterm.action.Paste } }",
        );
        let Some(Value::Array(keys)) = module.get("keys") else {
            panic!("expected keys array");
        };
        let Some(Value::Action(action)) = keys[0].get("action") else {
            panic!("expected action value");
        };
        assert_eq!(action.name, "Paste");
        assert!(action.args.is_empty());
    }

    #[test]
    fn test_unknown_builtin_becomes_fragment() {
        let module = eval("config.custom_feature(42)");
        assert_eq!(module.fragments.len(), 1);
        assert_eq!(module.fragments[0].text, "config.custom_feature(42)");
    }

    #[test]
    fn test_unresolved_reference_becomes_fragment() {
        let module = eval("config.font_size = mystery_size");
        assert!(module.get("font_size").is_none());
        assert_eq!(module.fragments.len(), 1);
        assert_eq!(module.fragments[0].text, "config.font_size = mystery_size");
    }

    #[test]
    fn test_local_value_binding_resolves() {
        let module = eval("local size = 13.5\nconfig.font_size = size");
        assert_eq!(module.get("font_size"), Some(&Value::Number(13.5)));
    }

    #[test]
    fn test_concat_of_literals() {
        let module = eval("config.term = 'xterm-' .. '256color'");
        assert_eq!(module.get("term"), Some(&Value::Str("xterm-256color".into())));
    }

    #[test]
    fn test_later_assignment_overwrites() {
        let module = eval("config.font_size = 10\nconfig.font_size = 12");
        assert_eq!(module.get("font_size"), Some(&Value::Number(12.0)));
        assert_eq!(module.settings().count(), 1);
    }

    #[test]
    fn test_empty_table_binds_config_object() {
        let module = parse_module("local config = {}\nconfig.font_size = 11\nreturn config")
            .unwrap();
        assert_eq!(module.get("font_size"), Some(&Value::Number(11.0)));
    }

    #[test]
    fn test_color_parse_builtin() {
        let module = eval("config.colors = { background = wezterm.color.parse('#1d1f21') }");
        let colors = module.get("colors").unwrap();
        assert_eq!(colors.get("background"), Some(&Value::Str("#1d1f21".into())));
    }

    #[test]
    fn test_control_flow_kept_verbatim() {
        let module = eval("if true then\n  config.font_size = 9\nend");
        assert_eq!(module.fragments.len(), 1);
        assert!(module.fragments[0].text.starts_with("if true"));
        assert!(module.get("font_size").is_none());
    }
}

//! Small AST helpers shared by the rules.

use swc_common::Span;
use swc_ecma_ast::{
    CallExpr, Callee, ClassDecl, Decorator, Expr, ObjectLit, Prop, PropName, PropOrSpread,
};

use crate::core::SourceUnit;
use crate::issues::{Issue, Rule, Severity};

/// If the decorator is a call whose target is a plain identifier
/// (`@Component({...})`, `@IonicPage()`), returns the identifier text and
/// the call. Bare decorators (`@Injectable`) don't match.
pub fn decorator_call(decorator: &Decorator) -> Option<(&str, &CallExpr)> {
    let Expr::Call(call) = &*decorator.expr else {
        return None;
    };
    let Callee::Expr(callee) = &call.callee else {
        return None;
    };
    let Expr::Ident(ident) = &**callee else {
        return None;
    };
    Some((ident.sym.as_str(), call))
}

/// The call's first argument, when it is an object literal.
pub fn object_arg(call: &CallExpr) -> Option<&ObjectLit> {
    match call.args.first().map(|arg| &*arg.expr) {
        Some(Expr::Object(object)) => Some(object),
        _ => None,
    }
}

/// Key text of an object-literal property (`name:` or `'name':`).
pub fn prop_key_text(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(|v| v.to_string()),
        _ => None,
    }
}

/// Whether the object literal carries a key-value property named `key`.
pub fn has_object_key(object: &ObjectLit, key: &str) -> bool {
    object.props.iter().any(|prop| {
        matches!(prop, PropOrSpread::Prop(p)
            if matches!(&**p, Prop::KeyValue(kv)
                if prop_key_text(&kv.key).as_deref() == Some(key)))
    })
}

/// Span covering the whole class declaration, decorators included.
pub fn class_anchor_span(node: &ClassDecl) -> Span {
    let mut span = node.class.span;
    if let Some(first) = node.class.decorators.first()
        && first.span.lo < span.lo
    {
        span.lo = first.span.lo;
    }
    span
}

/// Build an issue anchored at `span` inside `unit`.
pub fn issue_at(
    unit: &SourceUnit,
    span: Span,
    message: String,
    severity: Severity,
    rule: Rule,
) -> Issue {
    let (line, col) = unit.position(span.lo);
    let (start, length) = unit.offset(span);
    Issue {
        file_path: unit.path.clone(),
        line,
        col,
        start,
        length,
        message,
        severity,
        rule,
        source_line: unit.source_line(line),
    }
}

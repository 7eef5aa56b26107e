//! Stateless consumers of an [`I18nContext`].
//!
//! Each accessor returns `None` for "render nothing". Lookup failures are
//! reported to the provider instead of being returned.

use crate::error::I18nError;
use crate::helpers::{Helper, HelperBundle};
use crate::provider::{I18nContext, Lookup};
use crate::tree::TranslationTree;
use serde_json::Value;
use std::sync::Arc;

/// Text at `path` for the current language.
///
/// Sequences of strings are rendered back to back. A map has no text form and
/// is reported as a lookup failure.
pub fn inline(ctx: &I18nContext, path: &str) -> Option<String> {
    let Lookup::Found(tree) = ctx.get(path) else {
        return None;
    };
    let text = tree.render_text();
    if text.is_none() {
        ctx.report_error(I18nError::lookup(format!(
            "Path \"{path}\" in \"{}\" is not text",
            ctx.lang()
        )));
    }
    text
}

/// Resolve `path` to whatever value lives there and hand it to `transform`.
pub fn render<R>(
    ctx: &I18nContext,
    path: &str,
    transform: impl FnOnce(&TranslationTree) -> R,
) -> Option<R> {
    ctx.get(path).as_tree().map(transform)
}

/// Call the helper `name` with `value`. Helpers that are plain data cannot be
/// rendered this way and count as missing.
pub fn helper(ctx: &I18nContext, name: &str, value: Option<&Value>) -> Option<String> {
    let bundle = bundle_or_report(ctx, name)?;
    let output = bundle.get(name).and_then(|found| found.call(value));
    if output.is_none() {
        report_missing_helper(ctx, name);
    }
    output
}

/// Pass the helper `name` and `value` to `transform`.
pub fn helper_with<R>(
    ctx: &I18nContext,
    name: &str,
    value: Option<&Value>,
    transform: impl FnOnce(&Helper, Option<&Value>) -> R,
) -> Option<R> {
    let bundle = bundle_or_report(ctx, name)?;
    match bundle.get(name) {
        Some(found) => Some(transform(found, value)),
        None => {
            report_missing_helper(ctx, name);
            None
        }
    }
}

fn bundle_or_report(ctx: &I18nContext, name: &str) -> Option<Arc<HelperBundle>> {
    let bundle = ctx.helpers();
    if bundle.is_none() {
        report_missing_helper(ctx, name);
    }
    bundle
}

fn report_missing_helper(ctx: &I18nContext, name: &str) {
    ctx.report_error(I18nError::lookup(format!(
        "could not find \"{name}\" for \"{}\"",
        ctx.lang()
    )));
}

/// What a component wrapped by [`with_i18n`] receives.
#[derive(Debug, Clone)]
pub struct WithI18n<P, R = ()> {
    pub i18n: I18nContext,
    pub forwarded_ref: R,
    pub props: P,
}

/// Wrap `component` so it also receives the provider context and a
/// passthrough reference. Props are forwarded untouched.
pub fn with_i18n<P, R, O>(
    component: impl Fn(WithI18n<P, R>) -> O,
) -> impl Fn(&I18nContext, P, R) -> O {
    move |ctx: &I18nContext, props: P, forwarded_ref: R| {
        component(WithI18n {
            i18n: ctx.clone(),
            forwarded_ref,
            props,
        })
    }
}

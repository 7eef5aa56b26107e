use i18n::{
    helper, helper_with, inline, render, with_i18n, Helper, HelperBundle, I18nContext,
    I18nProvider, StaticLoader, SyncFn, TranslationTree,
};
use serde_json::{json, Value};

const EN: &str = r#"{
    "hello": "Hello",
    "world": "world",
    "parts": ["Hel", "lo"],
    "have-milk": {
        "have": "I have",
        "count": ["mugs", "mug"],
        "milk": "of milk",
        "alot": "(That's a lot of milk!)"
    }
}"#;

fn loader() -> StaticLoader {
    StaticLoader::new().with("en", TranslationTree::from_json(EN).expect("valid json"))
}

async fn ready_provider() -> I18nProvider {
    let provider = I18nProvider::builder("en", loader()).build();
    provider.init().await;
    provider
}

async fn provider_with_helpers() -> I18nProvider {
    let factory = SyncFn(|lang: &str| {
        let lang = lang.to_string();
        Ok::<_, anyhow::Error>(
            HelperBundle::new()
                .with_fn("greet", move |value| {
                    let name = value.and_then(Value::as_str).unwrap_or("you");
                    format!("[{lang}] hi {name}")
                })
                .with_value("currency", "EUR"),
        )
    });
    let provider = I18nProvider::builder("en", loader()).helpers(factory).build();
    provider.init().await;
    provider
}

#[tokio::test]
async fn inline_renders_text() {
    let provider = ready_provider().await;
    let ctx = provider.context();

    assert_eq!(inline(&ctx, "world").as_deref(), Some("world"));
    assert_eq!(inline(&ctx, "have-milk.count.0").as_deref(), Some("mugs"));
    assert_eq!(inline(&ctx, "parts").as_deref(), Some("Hello"));
    assert!(ctx.last_error().is_none());
}

#[tokio::test]
async fn inline_renders_nothing_before_ready() {
    let provider = I18nProvider::builder("en", loader()).build();
    let ctx = provider.context();

    assert_eq!(inline(&ctx, "world"), None);
    assert!(ctx.last_error().is_none());
}

#[tokio::test]
async fn inline_reports_missing_and_non_text_paths() {
    let provider = ready_provider().await;
    let ctx = provider.context();

    assert_eq!(inline(&ctx, "fail"), None);
    let missing = ctx.last_error().expect("missing path reported");
    assert!(missing.is_lookup());

    ctx.clear_last_error();
    assert_eq!(inline(&ctx, "have-milk"), None);
    assert!(ctx.last_error().expect("map reported").is_lookup());
}

#[tokio::test]
async fn render_passes_structured_values() {
    let provider = ready_provider().await;
    let ctx = provider.context();
    let count = 3;

    let line = render(&ctx, "have-milk", |tree| {
        let milk = tree.as_map().expect("map");
        let text = |key: &str| milk[key].as_text().unwrap_or_default().to_string();
        let units = milk["count"].as_list().expect("list");
        let unit = units[usize::from(count == 1)].as_text().unwrap_or_default();
        let mut line = format!("{} {count} {unit} {}", text("have"), text("milk"));
        if count > 2 {
            line = format!("{line} {}", text("alot"));
        }
        line
    });

    assert_eq!(
        line.as_deref(),
        Some("I have 3 mugs of milk (That's a lot of milk!)")
    );
}

#[tokio::test]
async fn render_skips_absent_paths() {
    let provider = ready_provider().await;
    let ctx = provider.context();

    let mut called = false;
    let out = render(&ctx, "nope", |_| called = true);
    assert!(out.is_none());
    assert!(!called);
}

#[tokio::test]
async fn helper_without_bundle_reports_and_renders_nothing() {
    let provider = ready_provider().await;
    let ctx = provider.context();

    assert_eq!(helper(&ctx, "greet", None), None);
    let error = ctx.last_error().expect("lookup reported");
    assert!(error.is_lookup());
    assert_eq!(error.message(), "could not find \"greet\" for \"en\"");
}

#[tokio::test]
async fn helper_calls_invocable_helpers() {
    let provider = provider_with_helpers().await;
    let ctx = provider.context();

    assert_eq!(
        helper(&ctx, "greet", Some(&json!("Ana"))).as_deref(),
        Some("[en] hi Ana")
    );
    assert_eq!(helper(&ctx, "greet", None).as_deref(), Some("[en] hi you"));
    assert!(ctx.last_error().is_none());
}

#[tokio::test]
async fn helper_reports_data_helpers_and_unknown_names() {
    let provider = provider_with_helpers().await;
    let ctx = provider.context();

    assert_eq!(helper(&ctx, "currency", None), None);
    assert!(ctx.last_error().is_some());

    ctx.clear_last_error();
    assert_eq!(helper(&ctx, "nope", None), None);
    assert!(ctx.last_error().is_some());
}

#[tokio::test]
async fn helper_with_hands_helper_to_transform() {
    let provider = provider_with_helpers().await;
    let ctx = provider.context();

    let price = helper_with(&ctx, "currency", Some(&json!(12)), |found, value| {
        let code = found.as_value().and_then(Value::as_str).unwrap_or("?");
        format!("{} {code}", value.map(ToString::to_string).unwrap_or_default())
    });
    assert_eq!(price.as_deref(), Some("12 EUR"));

    let greeting = helper_with(&ctx, "greet", None, |found: &Helper, _| {
        found.call(Some(&json!("Bo"))).map(|s| s.to_uppercase())
    });
    assert_eq!(greeting.flatten().as_deref(), Some("[EN] HI BO"));

    assert_eq!(helper_with(&ctx, "nope", None, |_, _| ()), None);
    assert!(ctx.last_error().is_some());
}

#[tokio::test]
async fn with_i18n_forwards_context_ref_and_props() {
    struct Props {
        hello: &'static str,
    }

    let provider = ready_provider().await;
    let ctx = provider.context();

    let wrapped = with_i18n(|input: i18n::WithI18n<Props, u32>| {
        format!(
            "{} {} #{}",
            input.props.hello,
            input.i18n.text("world"),
            input.forwarded_ref
        )
    });

    assert_eq!(wrapped(&ctx, Props { hello: "hello" }, 7), "hello world #7");
}

#[tokio::test]
async fn with_i18n_sees_the_same_provider() {
    let provider = ready_provider().await;
    let ctx = provider.context();

    let wrapped = with_i18n(|input: i18n::WithI18n<(), ()>| input.i18n);
    let forwarded: I18nContext = wrapped(&ctx, (), ());
    assert_eq!(forwarded, ctx);
}

use markdown_weave_render::{OverrideArgs, Overrides, render_markdown, to_html};
use markdown_weave_syntax::ast::PropValue;

fn html(source: &str) -> String {
    let nodes = render_markdown::<String>(source, &Overrides::new()).unwrap();
    to_html(&nodes)
}

#[test]
fn heading_and_paragraph() {
    insta::assert_snapshot!(
        html("# Hello *there*\n\nSome `code` & <stuff>."),
        @r#"<h1 id="hello-there">Hello <em>there</em></h1><p>Some <code class="inline-code">code</code> &amp; &lt;stuff&gt;.</p>"#
    );
}

#[test]
fn highlighted_code_block() {
    insta::assert_snapshot!(
        html("```js\nconst a = 1;\n```"),
        @r#"<pre class="language-js"><code><span class="hl-keyword">const</span> <span class="hl-variable">a</span> <span class="hl-operator">=</span> <span class="hl-number">1</span><span class="hl-punctuation">;</span></code></pre>"#
    );
}

#[test]
fn task_list() {
    insta::assert_snapshot!(
        html("- [x] shipped\n- [ ] pending"),
        @r#"<ul><li class="task-list-item"><input checked disabled type="checkbox"><span>shipped</span></li><li class="task-list-item"><input disabled type="checkbox"><span>pending</span></li></ul>"#
    );
}

#[test]
fn aligned_table() {
    insta::assert_snapshot!(
        html("| Name | Age |\n|:-----|----:|\n| Ann | 31 |"),
        @r#"<table><thead><tr><th style="text-align: left">Name</th><th style="text-align: right">Age</th></tr></thead><tbody><tr><td style="text-align: left">Ann</td><td style="text-align: right">31</td></tr></tbody></table>"#
    );
}

#[test]
fn ordered_list_with_start_and_rule() {
    insta::assert_snapshot!(
        html("5. five\n6. six\n\n---"),
        @r#"<ol start="5"><li><p>five</p></li><li><p>six</p></li></ol><hr>"#
    );
}

#[test]
fn unknown_component() {
    insta::assert_snapshot!(
        html("::Chart{kind: \"bar\"}::"),
        @r#"<div class="unknown-component" data-component="Chart">Unknown component: Chart</div>"#
    );
}

#[test]
fn component_override_output_is_inlined() {
    let overrides = Overrides::new().with("Note", |args: OverrideArgs<String>| {
        let tone = match args.props.get("tone") {
            Some(PropValue::String(tone)) => tone.clone(),
            _ => "plain".to_string(),
        };
        Ok(format!(
            "<aside data-tone=\"{tone}\">{}</aside>",
            to_html(&args.children)
        ))
    });
    let nodes = render_markdown("::Note{tone: \"warn\"}\nCareful **now**.\n::", &overrides).unwrap();
    insta::assert_snapshot!(
        to_html(&nodes),
        @r#"<aside data-tone="warn"><p>Careful <strong>now</strong>.</p></aside>"#
    );
}

#[test]
fn link_image_and_break() {
    insta::assert_snapshot!(
        html("[site](https://example.com \"Home\")  \n![logo](/l.png)"),
        @r#"<p><a href="https://example.com" title="Home">site</a><br><img alt="logo" src="/l.png"></p>"#
    );
}

#![cfg(test)]

use crate::{
    binding::BindingKind,
    resolve::resolve,
    scope::{scopes, Scope},
    syntax::parse,
    unused::{Settings, Unused},
};

const ALL: Settings = Settings {
    include_receiver: true,
    include_named_results: true,
};

fn run_with(settings: Settings, content: &str) -> Vec<Unused> {
    let ast = parse(content);
    assert_eq!(0, ast.errors().len(), "{:?}", ast.errors());

    settings.find_unused(&ast.node())
}

fn run(content: &str) -> Vec<Unused> {
    run_with(ALL, content)
}

fn names(results: &[Unused]) -> Vec<&str> {
    results
        .iter()
        .map(|result| result.binding.name.as_str())
        .collect()
}

#[test]
fn all_used() {
    let results = run("package p\nfunc Add(a, b int) int { return a + b }\n");
    assert_eq!(0, results.len());
}

#[test]
fn unused_param() {
    let results = run("package p\nfunc Add(a, b, c int) int { return a + b }\n");
    assert_eq!(1, results.len());
    assert_eq!(results[0].binding.kind, BindingKind::Parameter);
    assert_eq!(results[0].binding.name.as_str(), "c");
}

#[test]
fn unused_receiver() {
    let results = run("package p\nfunc (e Example) Sub(a, b int) int { return a - b }\n");
    assert_eq!(1, results.len());
    assert_eq!(results[0].binding.kind, BindingKind::Receiver);
    assert_eq!(results[0].binding.name.as_str(), "e");
    assert_eq!(results[0].to_string(), "Unused receiver: e");
    assert_eq!(results[0].scope.to_string(), "method Sub");
}

#[test]
fn receiver_gated() {
    let results = run_with(
        Settings::default(),
        "package p\nfunc (e Example) Sub(a, b int) int { return a - b }\n",
    );
    assert_eq!(0, results.len());
}

#[test]
fn unnamed_receiver() {
    let results = run("package p\nfunc (*Example) NoReceiver() {}\n");
    assert_eq!(0, results.len());
}

#[test]
fn unused_named_result() {
    let content = "package p\nfunc missingRet() (err error, ok bool) {\n\tok = true\n\treturn\n}\n";
    let results = run(content);
    assert_eq!(1, results.len());
    assert_eq!(results[0].binding.kind, BindingKind::Result);
    assert_eq!(results[0].binding.name.as_str(), "err");

    let results = run_with(Settings::default(), content);
    assert_eq!(0, results.len());
}

#[test]
fn unnamed_results() {
    let results = run("package p\nfunc f() (int, error) { return 0, nil }\n");
    assert_eq!(0, results.len());
}

#[test]
fn placeholder_excluded() {
    let results = run("package p\nfunc f(_ int, a int) (_ error) { return nil }\n");
    assert_eq!(names(&results), ["a"]);
}

#[test]
fn no_body() {
    let results = run("package p\nfunc external(a, b int) int\n");
    assert_eq!(0, results.len());
}

#[test]
fn empty_body() {
    let results = run("package p\nfunc (e E) m(a int, b string) (n int) {}\n");
    assert_eq!(names(&results), ["e", "a", "b", "n"]);
}

#[test]
fn shadowed_param_is_unused() {
    let results = run("package p\nfunc f(a int) {\n\tg := func(a int) int { return a }\n\t_ = g\n}\n");
    assert_eq!(1, results.len());
    assert_eq!(results[0].binding.name.as_str(), "a");
    assert_eq!(results[0].scope.to_string(), "function f");
}

#[test]
fn shadowed_in_block_is_unused() {
    let results = run("package p\nfunc f(a int) {\n\tif a := 2; a > 1 {\n\t}\n}\n");
    assert_eq!(names(&results), ["a"]);
}

#[test]
fn captured_by_closure() {
    let results = run("package p\nfunc f(a int) func() int {\n\treturn func() int { return a }\n}\n");
    assert_eq!(0, results.len());
}

#[test]
fn unused_in_literal() {
    let results = run("package p\nfunc main() {\n\tfunc(a, b string) string {\n\t\treturn a\n\t}(\"dog\", \"cat\")\n}\n");
    assert_eq!(1, results.len());
    assert_eq!(results[0].binding.name.as_str(), "b");
    assert_eq!(results[0].scope.to_string(), "function literal");
}

#[test]
fn redeclared_counts_as_use() {
    let results = run("package p\nfunc f(err error) {\n\tx, err := g()\n\t_ = x\n}\n");
    assert_eq!(0, results.len());
}

#[test]
fn composite_key_counts_as_use() {
    let results = run("package p\nfunc f(a int) T {\n\treturn T{a: 1}\n}\n");
    assert_eq!(0, results.len());
}

#[test]
fn selector_member_is_no_use() {
    let results = run("package p\nfunc f(a int, s S) int {\n\treturn s.a\n}\n");
    assert_eq!(names(&results), ["a"]);
}

#[test]
fn literal_in_package_initializer() {
    let results = run("package p\nvar handler = func(w Writer, r *Request) { w.Write(nil) }\n");
    assert_eq!(names(&results), ["r"]);
}

#[test]
fn results_sorted_by_position() {
    let results = run("package p\nfunc a(x int) {}\nfunc b(y int) { _ = func(z int) {} }\n");
    assert_eq!(names(&results), ["x", "y", "z"]);
}

#[test]
fn scope_walker_order() {
    let ast = parse("package p\nfunc f() {\n\tg := func() { _ = func() {} }\n\t_ = g\n}\nfunc (r R) m()\n");
    let found = scopes(&ast.node())
        .map(|scope| scope.to_string())
        .collect::<Vec<_>>();
    assert_eq!(found, ["function f", "function literal", "function literal", "method m"]);
}

#[test]
fn scan_without_body() {
    let ast = parse("package p\nfunc (r R) m(a int)\n");
    let root = ast.node();
    let resolution = resolve(&root);
    let scope = scopes(&root).next().expect("scope");
    assert!(matches!(scope, Scope::Function(_)));
    assert!(scope.body().is_none());
    assert_eq!(scope.receiver().map(|name| name.as_str().to_string()).as_deref(), Some("r"));
    assert_eq!(0, ALL.scan(&scope, &resolution).len());
}

#[test]
fn rewrite_reports_parse_errors() {
    let result = ALL.rewrite("package p\nfunc f( {\n");
    assert!(matches!(result, Err(crate::Error::Parse { .. })));
}

#[test]
fn rewrite_missing_file() {
    let result = ALL.rewrite_file(std::path::Path::new("/nonexistent/goblank/file.go"));
    assert!(matches!(result, Err(crate::Error::Io { .. })));
}

#[test]
fn rewrite_too_deep_is_a_parse_error() {
    let content = format!(
        "package p\nfunc f(a, b int) int {{ return {}a{} }}\n",
        "(".repeat(50_000),
        ")".repeat(50_000)
    );
    let result = ALL.rewrite(&content);
    assert!(matches!(result, Err(crate::Error::Parse { .. })));
}

#[test]
fn rewrite_file_keeps_source() {
    let content = "package p\nfunc Add(a, b, c int) int { return a + b }\n";
    let path = std::env::temp_dir().join(format!("goblank-{}-rewrite.go", std::process::id()));
    std::fs::write(&path, content).expect("write");
    let result = ALL.rewrite_file(&path);
    std::fs::remove_file(&path).expect("remove");

    let rewrite = result.expect("rewrite");
    assert!(rewrite.altered);
    assert_eq!(rewrite.source, content);
    assert_eq!(rewrite.text, "package p\nfunc Add(a, b, _ int) int { return a + b }\n");
    assert_eq!(names(&rewrite.unused), ["c"]);
}

#![cfg(test)]

use super::{
    ast::{FuncDecl, SourceFile, TypedNode},
    parse,
    parser::MAX_DEPTH,
    SyntaxKind,
    SyntaxKind::*,
    SyntaxNode,
};

fn run(src: &str) -> SyntaxNode {
    let parse = parse(src);
    assert_eq!(0, parse.errors().len(), "{:?}", parse.errors());
    let node = parse.node();
    assert_eq!(node.to_string(), src);
    node
}

fn count(node: &SyntaxNode, kind: SyntaxKind) -> usize {
    node.descendants().filter(|node| node.kind() == kind).count()
}

const SAMPLE: &str = r#"// Package sample exercises most of the grammar.
package sample

import (
	"fmt"
	str "strings"
	. "math"
	_ "embed"
)

const (
	A = iota
	B
)

var x, y int = 1, 2

type (
	Point struct {
		X, Y int `json:"x"`
		*Embedded
		fmt.Stringer
	}
	Shape interface {
		Area() float64
		~int | ~string
	}
	List[T any] struct {
		items []T
	}
	Array [4]byte
	Fn    func(int, string) (bool, error)
)

func (l *List[T]) Push(v T) {
	l.items = append(l.items, v)
}

func Map[T, U any](xs []T, f func(T) U) []U {
	out := make([]U, 0, len(xs))
	for _, x := range xs {
		out = append(out, f(x))
	}
	return out
}

func control(ch chan int, done <-chan struct{}) (n int, err error) {
	if p := (Point{X: 1}); p.X > 0 {
		n++
	} else if n == 0 {
		n--
	} else {
		n += 2
	}

	switch v := any(n).(type) {
	case int, int64:
		_ = v
	default:
	}

	switch {
	case n > 1 && !false:
		fallthrough
	case n < 0:
	}

	for i := 0; i < 10; i++ {
		if i%2 == 0 {
			continue
		}
	}

outer:
	for {
		select {
		case v, ok := <-ch:
			_, _ = v, ok
			break outer
		case ch <- 1:
		case <-done:
			return
		}
	}

	go func() { defer close(ch) }()
	m := map[string][]int{"a": {1, 2}, "b": nil}
	s := []Point{{1, 2}, {X: 3}}
	_ = m["a"][1:2:2]
	_ = s[:]
	f := func(xs ...int) int { return len(xs) }
	_ = f(1, 2)
	_ = f([]int{1}...)
	fmt.Println(str.ToUpper("x"), Pi, x, y, A, B)
	return n, fmt.Errorf("%d", n)
}
"#;

#[test]
fn sample_file() {
    let node = run(SAMPLE);
    assert_eq!(count(&node, NODE_FUNC_DECL), 3);
    assert_eq!(count(&node, NODE_FUNC_LIT), 2);
    assert_eq!(count(&node, NODE_TYPE_SWITCH_STMT), 1);
    assert_eq!(count(&node, NODE_SWITCH_STMT), 1);
    assert_eq!(count(&node, NODE_SELECT_STMT), 1);
    assert_eq!(count(&node, NODE_LABELED_STMT), 1);
}

#[test]
fn func_decl_parts() {
    let node = run("package p\n\nfunc (e *E) M(a, b int, c string) (n int, err error) {}\n");
    let file = SourceFile::cast(node).expect("SourceFile");
    let func = file.func_decls().next().expect("func");
    assert_eq!(func.name().expect("name").as_str(), "M");

    let receiver = func.receiver().expect("receiver");
    let names = receiver
        .param_list()
        .expect("receiver list")
        .params()
        .flat_map(|param| param.names().collect::<Vec<_>>())
        .map(|name| name.as_str().to_string())
        .collect::<Vec<_>>();
    assert_eq!(names, ["e"]);

    let params = func.params().expect("params").params().collect::<Vec<_>>();
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].names().count(), 2);
    assert_eq!(params[1].names().count(), 1);

    let results = func.results().expect("results");
    assert_eq!(results.param_list().expect("named results").params().count(), 2);
    assert!(func.body().is_some());
}

#[test]
fn unnamed_params() {
    let node = run("package p\n\nfunc f(int, []string, ...error) bool\n");
    let func = node
        .descendants()
        .find_map(FuncDecl::cast)
        .expect("func");
    let params = func.params().expect("params").params().collect::<Vec<_>>();
    assert_eq!(params.len(), 3);
    assert!(params.iter().all(|param| param.names().next().is_none()));
    assert!(func.results().expect("result").param_list().is_none());
    assert!(func.body().is_none());
}

#[test]
fn qualified_and_generic_param_types() {
    let node = run("package p\n\nfunc f(ctx context.Context, m Map[string, int]) {}\n");
    let func = node.descendants().find_map(FuncDecl::cast).expect("func");
    let names = func
        .params()
        .expect("params")
        .params()
        .flat_map(|param| param.names().collect::<Vec<_>>())
        .map(|name| name.as_str().to_string())
        .collect::<Vec<_>>();
    assert_eq!(names, ["ctx", "m"]);
}

#[test]
fn composite_literal_in_header() {
    // `T {` opens the block here, not a literal
    let node = run("package p\n\nfunc f() {\n\tfor x == T {\n\t}\n\tif v := (T{}); v.ok {\n\t}\n}\n");
    assert_eq!(count(&node, NODE_COMPOSITE_LIT), 1);
    assert_eq!(count(&node, NODE_FOR_STMT), 1);
    assert_eq!(count(&node, NODE_IF_STMT), 1);
}

#[test]
fn semicolon_insertion() {
    let node = run("package p\n\nfunc f() int {\n\tx := 1 // one\n\ty := x +\n\t\t2\n\treturn /* a\n\t*/ y\n}\n");
    assert_eq!(count(&node, NODE_SHORT_VAR_DECL), 2);
    assert_eq!(count(&node, NODE_BINARY_EXPR), 1);
    // the multi-line comment ends the return statement
    let ret = node
        .descendants()
        .find(|node| node.kind() == NODE_RETURN_STMT)
        .expect("return");
    assert_eq!(ret.children().count(), 0);
}

#[test]
fn func_literal_in_initializer() {
    let node = run("package p\n\nvar handler = func(w Writer, r *Request) {}\n");
    assert_eq!(count(&node, NODE_FUNC_LIT), 1);
    assert_eq!(count(&node, NODE_PARAM), 2);
}

#[test]
fn selector_member_is_not_a_reference() {
    let node = run("package p\n\nfunc f() { a.b.c() }\n");
    let refs = node
        .descendants()
        .filter(|node| node.kind() == NODE_NAME_REF)
        .map(|node| node.to_string())
        .collect::<Vec<_>>();
    assert_eq!(refs, ["a"]);
}

#[test]
fn errors_keep_text() {
    let src = "package p\n\nfunc f( {\n\treturn 1 +\n}\n";
    let parse = parse(src);
    assert!(!parse.errors().is_empty());
    assert_eq!(parse.node().to_string(), src);
    assert!(parse.ok().is_err());
}

#[test]
fn missing_package() {
    let parse = parse("func f() {}\n");
    assert_eq!(1, parse.errors().len());
    assert!(parse.errors()[0].message.contains("package"));
}

/// Source text of a function whose body is `body`
fn func_with(body: &str) -> String {
    format!("package p\n\nfunc f(a, b int) int {{\n\t{}\n}}\n", body)
}

#[test]
fn nesting_within_limit() {
    let depth = 200;
    let node = run(&func_with(&format!(
        "return {}a{} + b",
        "(".repeat(depth),
        ")".repeat(depth)
    )));
    assert_eq!(count(&node, NODE_PAREN_EXPR), depth);
}

#[test]
fn nesting_too_deep() {
    let depth = 50_000;
    let sources = [
        func_with(&format!("return {}a{}", "(".repeat(depth), ")".repeat(depth))),
        func_with(&format!("return {}true", "!".repeat(depth))),
        func_with(&format!("{}{}", "{".repeat(depth), "}".repeat(depth))),
        func_with(&format!("var x {}int", "[]".repeat(depth))),
    ];
    for src in &sources {
        let parse = parse(src);
        assert_eq!(parse.node().to_string(), *src);
        assert_eq!(1, parse.errors().len(), "{:?}", parse.errors());
        assert_eq!(
            parse.errors()[0].message,
            format!("exceeded max nesting depth of {}", MAX_DEPTH)
        );
    }
}

#[test]
fn kind_from_raw() {
    for kind in [TOKEN_WHITESPACE, TOKEN_IDENT, NODE_SOURCE_FILE, NODE_BINARY_EXPR] {
        assert_eq!(SyntaxKind::from_raw(kind as u16), Some(kind));
    }
    assert_eq!(SyntaxKind::from_raw(NODE_BINARY_EXPR as u16 + 1), None);
}

#![cfg(test)]

use crate::{
    resolve::{resolve, DeclId, DeclKind, Resolution},
    syntax::{parse, SyntaxKind, SyntaxNode, SyntaxToken},
};

fn run(src: &str) -> (SyntaxNode, Resolution) {
    let node = parse(src).ok().expect("parse errors");
    let resolution = resolve(&node);
    (node, resolution)
}

/// Identifier tokens with the given text, in source order
fn idents(node: &SyntaxNode, text: &str) -> Vec<SyntaxToken> {
    node.descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| token.kind() == SyntaxKind::TOKEN_IDENT && token.text() == text)
        .collect()
}

fn decl(resolution: &Resolution, token: &SyntaxToken) -> DeclId {
    resolution.declaration(token).expect("declaration")
}

#[test]
fn param_use() {
    let (node, resolution) = run("package p\nfunc f(a int) int { return a }\n");
    let a = idents(&node, "a");
    let param = decl(&resolution, &a[0]);
    assert_eq!(resolution[param].kind, DeclKind::Param);
    assert_eq!(resolution.referent(&a[1]), Some(param));
}

#[test]
fn shadowed_in_block() {
    let (node, resolution) = run("package p\nfunc f(a int) {\n\t{\n\t\ta := 1\n\t\t_ = a\n\t}\n}\n");
    let a = idents(&node, "a");
    let param = decl(&resolution, &a[0]);
    let local = decl(&resolution, &a[1]);
    assert_ne!(param, local);
    assert_eq!(resolution.referent(&a[2]), Some(local));
    assert_eq!(resolution.reference_count(param), 0);
}

#[test]
fn shadowed_by_func_literal_param() {
    let (node, resolution) = run("package p\nfunc f(a int) {\n\tg := func(a int) int { return a }\n\t_ = g\n}\n");
    let a = idents(&node, "a");
    let outer = decl(&resolution, &a[0]);
    let inner = decl(&resolution, &a[1]);
    assert_eq!(resolution.referent(&a[2]), Some(inner));
    assert_eq!(resolution.reference_count(outer), 0);
}

#[test]
fn closure_captures_outer() {
    let (node, resolution) = run("package p\nfunc f(a int) func() int {\n\treturn func() int { return a }\n}\n");
    let a = idents(&node, "a");
    assert_eq!(resolution.referent(&a[1]), Some(decl(&resolution, &a[0])));
}

#[test]
fn redeclaration_links_to_existing() {
    let (node, resolution) = run("package p\nfunc f(err error) {\n\tx, err := g()\n\t_ = x\n}\n");
    let err = idents(&node, "err");
    let param = decl(&resolution, &err[0]);
    // `err` is assigned to, not declared again
    assert_eq!(resolution.declaration(&err[1]), None);
    assert_eq!(resolution.referent(&err[1]), Some(param));
}

#[test]
fn short_var_decl_in_nested_block_declares() {
    let (node, resolution) = run("package p\nfunc f(err error) {\n\tif x, err := g(); err != nil {\n\t\t_ = x\n\t}\n}\n");
    let err = idents(&node, "err");
    let param = decl(&resolution, &err[0]);
    let local = decl(&resolution, &err[1]);
    assert_ne!(param, local);
    assert_eq!(resolution.referent(&err[2]), Some(local));
}

#[test]
fn right_hand_side_sees_outer() {
    let (node, resolution) = run("package p\nfunc f(a int) {\n\t{\n\t\ta := a + 1\n\t\t_ = a\n\t}\n}\n");
    let a = idents(&node, "a");
    let param = decl(&resolution, &a[0]);
    let local = decl(&resolution, &a[1]);
    assert_eq!(resolution.referent(&a[2]), Some(param));
    assert_eq!(resolution.referent(&a[3]), Some(local));
}

#[test]
fn params_not_visible_in_signature() {
    let (node, resolution) = run("package p\ntype T int\nfunc f(T T) T { return T }\n");
    let t = idents(&node, "T");
    let ty = decl(&resolution, &t[0]);
    let param = decl(&resolution, &t[1]);
    assert_eq!(resolution[ty].kind, DeclKind::Type);
    assert_eq!(resolution.referent(&t[2]), Some(ty));
    assert_eq!(resolution.referent(&t[3]), Some(ty));
    assert_eq!(resolution.referent(&t[4]), Some(param));
}

#[test]
fn package_scope_is_order_independent() {
    let (node, resolution) = run("package p\nfunc f() int { return g() + v }\nfunc g() int { return 0 }\nvar v = 1\n");
    let g = idents(&node, "g");
    let v = idents(&node, "v");
    assert_eq!(resolution.referent(&g[0]), Some(decl(&resolution, &g[1])));
    assert_eq!(resolution.referent(&v[0]), Some(decl(&resolution, &v[1])));
}

#[test]
fn type_params() {
    let (node, resolution) = run("package p\nfunc f[T any](x T) T { var y T = x; return y }\n");
    let t = idents(&node, "T");
    let param = decl(&resolution, &t[0]);
    assert_eq!(resolution[param].kind, DeclKind::TypeParam);
    assert_eq!(resolution.reference_count(param), 3);
}

#[test]
fn receiver_and_results() {
    let (node, resolution) = run("package p\ntype E int\nfunc (e E) m() (n int) { n = int(e); return }\n");
    let e = idents(&node, "e");
    let n = idents(&node, "n");
    assert_eq!(resolution[decl(&resolution, &e[0])].kind, DeclKind::Receiver);
    assert_eq!(resolution[decl(&resolution, &n[0])].kind, DeclKind::Result);
    assert_eq!(resolution.referent(&e[1]), Some(decl(&resolution, &e[0])));
    assert_eq!(resolution.referent(&n[1]), Some(decl(&resolution, &n[0])));
}

#[test]
fn selectors_fields_and_labels_are_not_uses() {
    let (node, resolution) = run(
        "package p\nfunc f(a, b, c int) {\n\tvar s struct{ a int }\n\t_ = s.a\nb:\n\tfor {\n\t\tbreak b\n\t}\n\t_ = T{c: 1}\n}\n",
    );
    let a = decl(&resolution, &idents(&node, "a")[0]);
    let b = decl(&resolution, &idents(&node, "b")[0]);
    let c = decl(&resolution, &idents(&node, "c")[0]);
    assert_eq!(resolution.reference_count(a), 0);
    assert_eq!(resolution.reference_count(b), 0);
    // composite literal keys are resolved tentatively
    assert_eq!(resolution.reference_count(c), 1);
}

#[test]
fn blank_is_never_declared() {
    let (node, resolution) = run("package p\nfunc f(_ int, _ string) { _ = 1 }\n");
    let blanks = idents(&node, "_");
    assert_eq!(blanks.len(), 3);
    assert!(blanks
        .iter()
        .all(|token| resolution.declaration(token).is_none() && resolution.referent(token).is_none()));
}

#[test]
fn type_switch_and_range() {
    let (node, resolution) = run(
        "package p\nfunc f(x any, m map[string]int) {\n\tswitch v := x.(type) {\n\tcase int:\n\t\t_ = v\n\t}\n\tfor k := range m {\n\t\t_ = k\n\t}\n}\n",
    );
    let v = idents(&node, "v");
    let k = idents(&node, "k");
    assert_eq!(resolution.referent(&v[1]), Some(decl(&resolution, &v[0])));
    assert_eq!(resolution.referent(&k[1]), Some(decl(&resolution, &k[0])));
    let x = decl(&resolution, &idents(&node, "x")[0]);
    let m = decl(&resolution, &idents(&node, "m")[0]);
    assert_eq!(resolution.reference_count(x), 1);
    assert_eq!(resolution.reference_count(m), 1);
}

#[test]
fn local_recursive_type() {
    let (node, resolution) = run("package p\nfunc f() {\n\ttype node struct{ next *node }\n\tvar n node\n\t_ = n\n}\n");
    let ty = idents(&node, "node");
    let declared = decl(&resolution, &ty[0]);
    assert_eq!(resolution.referent(&ty[1]), Some(declared));
    assert_eq!(resolution.referent(&ty[2]), Some(declared));
}

#[test]
fn func_type_params_are_scoped() {
    let (node, resolution) = run("package p\nfunc f(a int) {\n\tvar g func(a string)\n\t_ = g\n}\n");
    let a = idents(&node, "a");
    let param = decl(&resolution, &a[0]);
    assert_ne!(resolution.declaration(&a[1]), Some(param));
    assert_eq!(resolution.reference_count(param), 0);
}

use super::{exprs, name, name_ref, signature};
use crate::syntax::parser::Parser;
use crate::syntax::SyntaxKind::*;

pub(super) fn at_type_start(p: &Parser) -> bool {
    p.at_any(&[
        TOKEN_IDENT,
        TOKEN_MUL,
        TOKEN_L_BRACK,
        TOKEN_MAP,
        TOKEN_CHAN,
        TOKEN_FUNC,
        TOKEN_STRUCT,
        TOKEN_INTERFACE,
        TOKEN_ARROW,
    ])
}

pub(super) fn type_(p: &mut Parser) {
    p.nested(|p| match p.current() {
        TOKEN_IDENT => type_name(p),
        TOKEN_MUL => {
            p.start(NODE_POINTER_TYPE);
            p.bump();
            type_(p);
            p.finish();
        }
        TOKEN_L_BRACK => array_or_slice_type(p),
        TOKEN_MAP => {
            p.start(NODE_MAP_TYPE);
            p.bump();
            p.expect(TOKEN_L_BRACK);
            type_(p);
            p.expect(TOKEN_R_BRACK);
            type_(p);
            p.finish();
        }
        TOKEN_CHAN | TOKEN_ARROW => {
            p.start(NODE_CHAN_TYPE);
            if p.eat(TOKEN_ARROW) {
                p.expect(TOKEN_CHAN);
            } else {
                p.bump();
                p.eat(TOKEN_ARROW);
            }
            type_(p);
            p.finish();
        }
        TOKEN_FUNC => {
            p.start(NODE_FUNC_TYPE);
            p.bump();
            signature(p);
            p.finish();
        }
        TOKEN_STRUCT => struct_type(p),
        TOKEN_INTERFACE => interface_type(p),
        TOKEN_L_PAREN => {
            p.start(NODE_PAREN_TYPE);
            p.bump();
            type_(p);
            p.expect(TOKEN_R_PAREN);
            p.finish();
        }
        _ => p.err_and_bump(
            "expected type",
            &[
                TOKEN_SEMICOLON,
                TOKEN_COMMA,
                TOKEN_R_PAREN,
                TOKEN_R_BRACK,
                TOKEN_R_BRACE,
                TOKEN_L_BRACE,
            ],
        ),
    });
}

/// `T`, `pkg.T`, `T[int]`
fn type_name(p: &mut Parser) {
    p.start(NODE_TYPE_NAME);
    name_ref(p);
    if p.at(TOKEN_DOT) && p.nth(1) == TOKEN_IDENT {
        p.bump();
        p.bump();
    }
    if p.at(TOKEN_L_BRACK) {
        type_args(p);
    }
    p.finish();
}

fn type_args(p: &mut Parser) {
    p.start(NODE_TYPE_ARGS);
    p.bump();
    while !p.at_any(&[TOKEN_R_BRACK, TOKEN_EOF]) {
        type_(p);
        if !p.eat(TOKEN_COMMA) {
            break;
        }
    }
    p.expect(TOKEN_R_BRACK);
    p.finish();
}

fn array_or_slice_type(p: &mut Parser) {
    let checkpoint = p.checkpoint();
    p.bump();
    let kind = if p.eat(TOKEN_R_BRACK) {
        NODE_SLICE_TYPE
    } else {
        if !p.eat(TOKEN_ELLIPSIS) {
            p.expr_lev += 1;
            exprs::expr(p);
            p.expr_lev -= 1;
        }
        p.expect(TOKEN_R_BRACK);
        NODE_ARRAY_TYPE
    };
    type_(p);
    p.start_at(checkpoint, kind);
    p.finish();
}

fn struct_type(p: &mut Parser) {
    p.start(NODE_STRUCT_TYPE);
    p.bump();
    p.expect(TOKEN_L_BRACE);
    while !p.at_any(&[TOKEN_R_BRACE, TOKEN_EOF]) {
        if p.eat(TOKEN_SEMICOLON) {
            continue;
        }
        field_decl(p);
        if !p.at(TOKEN_R_BRACE) && !p.eat(TOKEN_SEMICOLON) {
            p.err_and_bump("expected ';' or '}' after field", &[TOKEN_R_BRACE]);
        }
    }
    p.expect(TOKEN_R_BRACE);
    p.finish();
}

/// `embedded` and `*embedded` fields versus `a, b T` fields
fn embedded_field(p: &Parser) -> bool {
    match p.nth(1) {
        TOKEN_SEMICOLON | TOKEN_R_BRACE | TOKEN_STRING | TOKEN_RAW_STRING | TOKEN_DOT => true,
        TOKEN_L_BRACK => p.matching_bracket(1).map_or(false, |close| {
            matches!(
                p.nth(close + 1),
                TOKEN_SEMICOLON | TOKEN_R_BRACE | TOKEN_STRING | TOKEN_RAW_STRING
            )
        }),
        _ => false,
    }
}

fn field_decl(p: &mut Parser) {
    p.start(NODE_FIELD_DECL);
    match p.current() {
        TOKEN_MUL => {
            p.bump();
            type_(p);
        }
        TOKEN_IDENT if embedded_field(p) => type_(p),
        TOKEN_IDENT => {
            super::name_list(p);
            type_(p);
        }
        _ => p.err_and_bump("expected field declaration", &[TOKEN_R_BRACE]),
    }
    if !p.eat(TOKEN_STRING) {
        p.eat(TOKEN_RAW_STRING);
    }
    p.finish();
}

fn interface_type(p: &mut Parser) {
    p.start(NODE_INTERFACE_TYPE);
    p.bump();
    p.expect(TOKEN_L_BRACE);
    while !p.at_any(&[TOKEN_R_BRACE, TOKEN_EOF]) {
        if p.eat(TOKEN_SEMICOLON) {
            continue;
        }
        if p.at(TOKEN_IDENT) && p.nth(1) == TOKEN_L_PAREN {
            p.start(NODE_METHOD_SPEC);
            name(p);
            signature(p);
            p.finish();
        } else {
            type_elem(p);
        }
        if !p.at(TOKEN_R_BRACE) && !p.eat(TOKEN_SEMICOLON) {
            p.err_and_bump("expected ';' or '}' after interface element", &[TOKEN_R_BRACE]);
        }
    }
    p.expect(TOKEN_R_BRACE);
    p.finish();
}

/// Constraint terms: `~int | ~string`, `comparable`, `interface{ M() }`
pub(super) fn type_elem(p: &mut Parser) {
    let checkpoint = p.checkpoint();
    let tilde = p.eat(TOKEN_TILDE);
    type_(p);
    let union = p.at(TOKEN_OR);
    while p.eat(TOKEN_OR) {
        p.eat(TOKEN_TILDE);
        type_(p);
    }
    if tilde || union {
        p.start_at(checkpoint, NODE_TYPE_ELEM);
        p.finish();
    }
}

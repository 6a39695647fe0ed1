use rowan::Checkpoint;

use super::{name_ref, signature, stmts, types};
use crate::syntax::parser::Parser;
use crate::syntax::SyntaxKind::{self, *};

/// What an operand could denote, as far as composite literals care
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operand {
    /// `T`, `pkg.T` or `T[int]`, which only start a literal outside of
    /// statement headers
    TypeName,
    /// `[]T`, `[N]T`, `map[K]V`, `struct{...}`
    LiteralType,
    Other,
}

pub(super) fn expr(p: &mut Parser) {
    binary_expr(p, 1);
}

pub(super) fn expr_list(p: &mut Parser) {
    expr(p);
    while p.eat(TOKEN_COMMA) {
        expr(p);
    }
}

fn precedence(kind: SyntaxKind) -> Option<u8> {
    let prec = match kind {
        TOKEN_LOR => 1,
        TOKEN_LAND => 2,
        TOKEN_EQL | TOKEN_NEQ | TOKEN_LSS | TOKEN_LEQ | TOKEN_GTR | TOKEN_GEQ => 3,
        TOKEN_ADD | TOKEN_SUB | TOKEN_OR | TOKEN_XOR => 4,
        TOKEN_MUL | TOKEN_DIV | TOKEN_REM | TOKEN_SHL | TOKEN_SHR | TOKEN_AND | TOKEN_AND_NOT => 5,
        _ => return None,
    };
    Some(prec)
}

fn binary_expr(p: &mut Parser, min_prec: u8) {
    let checkpoint = p.checkpoint();
    unary_expr(p);
    while let Some(prec) = precedence(p.current()) {
        if prec < min_prec {
            break;
        }
        p.bump();
        binary_expr(p, prec + 1);
        p.start_at(checkpoint, NODE_BINARY_EXPR);
        p.finish();
    }
}

fn unary_expr(p: &mut Parser) {
    p.nested(|p| match p.current() {
        TOKEN_ADD | TOKEN_SUB | TOKEN_NOT | TOKEN_XOR | TOKEN_AND | TOKEN_MUL | TOKEN_TILDE => {
            p.start(NODE_UNARY_EXPR);
            p.bump();
            unary_expr(p);
            p.finish();
        }
        // `<-chan T` is a type, `<-ch` a receive
        TOKEN_ARROW if p.nth(1) != TOKEN_CHAN => {
            p.start(NODE_UNARY_EXPR);
            p.bump();
            unary_expr(p);
            p.finish();
        }
        _ => primary_expr(p),
    });
}

fn primary_expr(p: &mut Parser) {
    let checkpoint = p.checkpoint();
    let mut operand = operand(p);
    loop {
        match p.current() {
            TOKEN_DOT => {
                operand = selector_or_assert(p, checkpoint);
            }
            TOKEN_L_BRACK => {
                index_or_slice(p, checkpoint);
                operand = Operand::TypeName;
            }
            TOKEN_L_PAREN => {
                call(p, checkpoint);
                operand = Operand::Other;
            }
            TOKEN_L_BRACE if composite_allowed(p, operand) => {
                literal_value(p);
                p.start_at(checkpoint, NODE_COMPOSITE_LIT);
                p.finish();
                operand = Operand::Other;
            }
            _ => break,
        }
    }
}

/// In statement headers `if x == T {` opens the block, only `[]T{}`
/// style literal types may start a composite literal there
fn composite_allowed(p: &Parser, operand: Operand) -> bool {
    match operand {
        Operand::TypeName => p.expr_lev >= 0,
        Operand::LiteralType => true,
        Operand::Other => false,
    }
}

fn operand(p: &mut Parser) -> Operand {
    match p.current() {
        kind if kind.is_literal() => {
            p.start(NODE_LITERAL);
            p.bump();
            p.finish();
            Operand::Other
        }
        TOKEN_IDENT => {
            name_ref(p);
            Operand::TypeName
        }
        TOKEN_L_PAREN => {
            p.start(NODE_PAREN_EXPR);
            p.bump();
            p.expr_lev += 1;
            expr(p);
            p.expr_lev -= 1;
            p.expect(TOKEN_R_PAREN);
            p.finish();
            Operand::Other
        }
        TOKEN_FUNC => {
            func_lit_or_type(p);
            Operand::Other
        }
        TOKEN_L_BRACK | TOKEN_MAP | TOKEN_STRUCT => {
            types::type_(p);
            Operand::LiteralType
        }
        TOKEN_CHAN | TOKEN_INTERFACE | TOKEN_ARROW => {
            types::type_(p);
            Operand::Other
        }
        _ => {
            p.err_and_bump(
                "expected expression",
                &[
                    TOKEN_SEMICOLON,
                    TOKEN_COMMA,
                    TOKEN_COLON,
                    TOKEN_R_PAREN,
                    TOKEN_R_BRACK,
                    TOKEN_R_BRACE,
                    TOKEN_L_BRACE,
                ],
            );
            Operand::Other
        }
    }
}

fn selector_or_assert(p: &mut Parser, checkpoint: Checkpoint) -> Operand {
    p.bump();
    match p.current() {
        TOKEN_IDENT => {
            // the member name is not a reference on its own
            p.bump();
            p.start_at(checkpoint, NODE_SELECTOR_EXPR);
            p.finish();
            Operand::TypeName
        }
        TOKEN_L_PAREN => {
            p.bump();
            if p.at(TOKEN_TYPE) {
                p.bump();
                p.type_guard = true;
            } else {
                types::type_(p);
            }
            p.expect(TOKEN_R_PAREN);
            p.start_at(checkpoint, NODE_TYPE_ASSERT_EXPR);
            p.finish();
            Operand::Other
        }
        _ => {
            p.error("expected selector or type assertion".to_string());
            p.start_at(checkpoint, NODE_SELECTOR_EXPR);
            p.finish();
            Operand::Other
        }
    }
}

/// `a[i]`, `f[int, string]`, `a[lo:hi]`, `a[lo:hi:max]`
fn index_or_slice(p: &mut Parser, checkpoint: Checkpoint) {
    p.bump();
    p.expr_lev += 1;
    let mut kind = NODE_INDEX_EXPR;
    if !p.at(TOKEN_COLON) {
        expr(p);
    }
    if p.at(TOKEN_COLON) {
        kind = NODE_SLICE_EXPR;
        while p.eat(TOKEN_COLON) {
            if !p.at_any(&[TOKEN_COLON, TOKEN_R_BRACK]) {
                expr(p);
            }
        }
    } else {
        while p.eat(TOKEN_COMMA) {
            if p.at(TOKEN_R_BRACK) {
                break;
            }
            expr(p);
        }
    }
    p.expr_lev -= 1;
    p.expect(TOKEN_R_BRACK);
    p.start_at(checkpoint, kind);
    p.finish();
}

fn call(p: &mut Parser, checkpoint: Checkpoint) {
    p.start(NODE_ARG_LIST);
    p.bump();
    p.expr_lev += 1;
    while !p.at_any(&[TOKEN_R_PAREN, TOKEN_EOF]) {
        expr(p);
        p.eat(TOKEN_ELLIPSIS);
        if !p.eat(TOKEN_COMMA) {
            break;
        }
    }
    p.expr_lev -= 1;
    p.expect(TOKEN_R_PAREN);
    p.finish();
    p.start_at(checkpoint, NODE_CALL_EXPR);
    p.finish();
}

fn literal_value(p: &mut Parser) {
    p.nested(literal_elements);
}

fn literal_elements(p: &mut Parser) {
    p.start(NODE_LITERAL_VALUE);
    p.bump();
    p.expr_lev += 1;
    while !p.at_any(&[TOKEN_R_BRACE, TOKEN_EOF]) {
        let checkpoint = p.checkpoint();
        element(p);
        if p.eat(TOKEN_COLON) {
            element(p);
            p.start_at(checkpoint, NODE_KEYED_ELEMENT);
            p.finish();
        }
        if !p.eat(TOKEN_COMMA) {
            break;
        }
    }
    p.expr_lev -= 1;
    p.expect(TOKEN_R_BRACE);
    p.finish();
}

fn element(p: &mut Parser) {
    if p.at(TOKEN_L_BRACE) {
        literal_value(p);
    } else {
        expr(p);
    }
}

/// `func(...) {...}` is a literal, a bare `func(...)` a type
fn func_lit_or_type(p: &mut Parser) {
    let checkpoint = p.checkpoint();
    p.bump();
    signature(p);
    let kind = if p.at(TOKEN_L_BRACE) {
        let expr_lev = p.expr_lev;
        p.expr_lev = 0;
        stmts::block(p);
        p.expr_lev = expr_lev;
        NODE_FUNC_LIT
    } else {
        NODE_FUNC_TYPE
    };
    p.start_at(checkpoint, kind);
    p.finish();
}

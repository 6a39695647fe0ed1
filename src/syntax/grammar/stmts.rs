use super::{exprs, gen_decl, name_list};
use crate::syntax::parser::Parser;
use crate::syntax::SyntaxKind::{self, *};

pub(super) fn block(p: &mut Parser) {
    p.start(NODE_BLOCK);
    p.expect(TOKEN_L_BRACE);
    stmt_list(p);
    p.expect(TOKEN_R_BRACE);
    p.finish();
}

fn stmt_list(p: &mut Parser) {
    while !p.at_any(&[TOKEN_R_BRACE, TOKEN_EOF, TOKEN_CASE, TOKEN_DEFAULT]) {
        if p.eat(TOKEN_SEMICOLON) {
            continue;
        }
        let position = p.position();
        statement(p);
        p.expect_semi();
        if p.position() == position {
            p.err_and_bump("expected statement", &[]);
        }
    }
}

fn statement(p: &mut Parser) {
    p.nested(|p| match p.current() {
        TOKEN_VAR | TOKEN_CONST | TOKEN_TYPE => gen_decl(p),
        TOKEN_GO | TOKEN_DEFER => {
            p.start(if p.at(TOKEN_GO) {
                NODE_GO_STMT
            } else {
                NODE_DEFER_STMT
            });
            p.bump();
            exprs::expr(p);
            p.finish();
        }
        TOKEN_RETURN => {
            p.start(NODE_RETURN_STMT);
            p.bump();
            if !p.at_any(&[TOKEN_SEMICOLON, TOKEN_R_BRACE]) {
                exprs::expr_list(p);
            }
            p.finish();
        }
        TOKEN_BREAK | TOKEN_CONTINUE | TOKEN_GOTO | TOKEN_FALLTHROUGH => {
            p.start(NODE_BRANCH_STMT);
            p.bump();
            if p.at(TOKEN_IDENT) {
                label(p);
            }
            p.finish();
        }
        TOKEN_L_BRACE => block(p),
        TOKEN_IF => if_stmt(p),
        TOKEN_SWITCH => switch_stmt(p),
        TOKEN_SELECT => select_stmt(p),
        TOKEN_FOR => for_stmt(p),
        TOKEN_IDENT if p.nth(1) == TOKEN_COLON => {
            p.start(NODE_LABELED_STMT);
            label(p);
            p.bump();
            if !p.at_any(&[TOKEN_R_BRACE, TOKEN_SEMICOLON]) {
                statement(p);
            }
            p.finish();
        }
        _ => {
            simple_stmt(p, false);
        }
    });
}

fn label(p: &mut Parser) {
    p.start(NODE_LABEL);
    p.bump();
    p.finish();
}

/// `a, b :=` ahead, returns the lookahead offset of `:=`
fn short_var_decl_ahead(p: &Parser) -> Option<usize> {
    if p.current() != TOKEN_IDENT {
        return None;
    }
    let mut i = 1;
    while p.nth(i) == TOKEN_COMMA && p.nth(i + 1) == TOKEN_IDENT {
        i += 2;
    }
    (p.nth(i) == TOKEN_DEFINE).then_some(i)
}

/// Expression, send, inc/dec, assignment or short variable declaration.
/// With `range_ok`, also the range clause of a `for` statement.
fn simple_stmt(p: &mut Parser, range_ok: bool) -> SyntaxKind {
    if let Some(define) = short_var_decl_ahead(p) {
        let kind = if range_ok && p.nth(define + 1) == TOKEN_RANGE {
            NODE_RANGE_CLAUSE
        } else {
            NODE_SHORT_VAR_DECL
        };
        p.start(kind);
        name_list(p);
        p.expect(TOKEN_DEFINE);
        if p.eat(TOKEN_RANGE) {
            exprs::expr(p);
        } else {
            exprs::expr_list(p);
        }
        p.finish();
        return kind;
    }

    if range_ok && p.at(TOKEN_RANGE) {
        p.start(NODE_RANGE_CLAUSE);
        p.bump();
        exprs::expr(p);
        p.finish();
        return NODE_RANGE_CLAUSE;
    }

    let checkpoint = p.checkpoint();
    exprs::expr_list(p);
    let kind = match p.current() {
        TOKEN_DEFINE => {
            p.error("non-name on left side of :=".to_string());
            p.bump();
            exprs::expr_list(p);
            NODE_ASSIGN_STMT
        }
        kind if kind.is_assign_op() => {
            p.bump();
            if range_ok && kind == TOKEN_ASSIGN && p.eat(TOKEN_RANGE) {
                exprs::expr(p);
                NODE_RANGE_CLAUSE
            } else {
                exprs::expr_list(p);
                NODE_ASSIGN_STMT
            }
        }
        TOKEN_ARROW => {
            p.bump();
            exprs::expr(p);
            NODE_SEND_STMT
        }
        TOKEN_INC | TOKEN_DEC => {
            p.bump();
            NODE_INC_DEC_STMT
        }
        _ => NODE_EXPR_STMT,
    };
    p.start_at(checkpoint, kind);
    p.finish();
    kind
}

fn if_stmt(p: &mut Parser) {
    p.nested(if_else_chain);
}

fn if_else_chain(p: &mut Parser) {
    p.start(NODE_IF_STMT);
    p.bump();
    let expr_lev = p.expr_lev;
    p.expr_lev = -1;
    if p.at(TOKEN_L_BRACE) {
        p.error("missing condition in if statement".to_string());
    } else {
        if !p.at(TOKEN_SEMICOLON) {
            simple_stmt(p, false);
        }
        if p.eat(TOKEN_SEMICOLON) {
            if p.at(TOKEN_L_BRACE) {
                p.error("missing condition in if statement".to_string());
            } else {
                exprs::expr(p);
            }
        }
    }
    p.expr_lev = expr_lev;
    block(p);
    if p.eat(TOKEN_ELSE) {
        match p.current() {
            TOKEN_IF => if_stmt(p),
            TOKEN_L_BRACE => block(p),
            _ => p.err_and_bump("expected if statement or block", &[TOKEN_SEMICOLON, TOKEN_R_BRACE]),
        }
    }
    p.finish();
}

fn for_stmt(p: &mut Parser) {
    p.start(NODE_FOR_STMT);
    p.bump();
    let expr_lev = p.expr_lev;
    p.expr_lev = -1;
    if !p.at(TOKEN_L_BRACE) {
        let mut init = None;
        if !p.at(TOKEN_SEMICOLON) {
            init = Some(simple_stmt(p, true));
        }
        if init != Some(NODE_RANGE_CLAUSE) && p.eat(TOKEN_SEMICOLON) {
            if !p.at(TOKEN_SEMICOLON) {
                exprs::expr(p);
            }
            p.expect(TOKEN_SEMICOLON);
            if !p.at(TOKEN_L_BRACE) {
                simple_stmt(p, false);
            }
        }
    }
    p.expr_lev = expr_lev;
    block(p);
    p.finish();
}

fn switch_stmt(p: &mut Parser) {
    let checkpoint = p.checkpoint();
    p.bump();
    let expr_lev = p.expr_lev;
    let type_guard = p.type_guard;
    p.expr_lev = -1;
    p.type_guard = false;
    if !p.at(TOKEN_L_BRACE) {
        if !p.at(TOKEN_SEMICOLON) {
            simple_stmt(p, false);
        }
        if p.eat(TOKEN_SEMICOLON) && !p.at(TOKEN_L_BRACE) {
            simple_stmt(p, false);
        }
    }
    p.expr_lev = expr_lev;
    let kind = if p.type_guard {
        NODE_TYPE_SWITCH_STMT
    } else {
        NODE_SWITCH_STMT
    };
    p.type_guard = type_guard;

    p.expect(TOKEN_L_BRACE);
    while !p.at_any(&[TOKEN_R_BRACE, TOKEN_EOF]) {
        if !p.at_any(&[TOKEN_CASE, TOKEN_DEFAULT]) {
            p.err_and_bump("expected case or default", &[TOKEN_R_BRACE]);
            continue;
        }
        p.start(NODE_CASE_CLAUSE);
        if p.eat(TOKEN_CASE) {
            exprs::expr_list(p);
        } else {
            p.bump();
        }
        p.expect(TOKEN_COLON);
        stmt_list(p);
        p.finish();
    }
    p.expect(TOKEN_R_BRACE);
    p.start_at(checkpoint, kind);
    p.finish();
}

fn select_stmt(p: &mut Parser) {
    p.start(NODE_SELECT_STMT);
    p.bump();
    p.expect(TOKEN_L_BRACE);
    while !p.at_any(&[TOKEN_R_BRACE, TOKEN_EOF]) {
        if !p.at_any(&[TOKEN_CASE, TOKEN_DEFAULT]) {
            p.err_and_bump("expected case or default", &[TOKEN_R_BRACE]);
            continue;
        }
        p.start(NODE_COMM_CLAUSE);
        if p.eat(TOKEN_CASE) {
            simple_stmt(p, false);
        } else {
            p.bump();
        }
        p.expect(TOKEN_COLON);
        stmt_list(p);
        p.finish();
    }
    p.expect(TOKEN_R_BRACE);
    p.finish();
}

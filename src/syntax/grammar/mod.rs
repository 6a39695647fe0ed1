//! Recursive descent over the Go grammar. Each function parses one
//! production starting at the current token and always consumes at least
//! one token unless it reports an error at a closing delimiter.

mod exprs;
mod stmts;
mod types;

use super::parser::Parser;
use super::SyntaxKind::{self, *};

const DECL_START: &[SyntaxKind] = &[TOKEN_FUNC, TOKEN_VAR, TOKEN_CONST, TOKEN_TYPE, TOKEN_IMPORT];

pub(crate) fn source_file(p: &mut Parser) {
    p.start_root(NODE_SOURCE_FILE);

    if p.at(TOKEN_PACKAGE) {
        p.start(NODE_PACKAGE_CLAUSE);
        p.bump();
        p.expect(TOKEN_IDENT);
        p.finish();
    } else {
        p.error("expected 'package' clause".to_string());
    }

    while !p.at(TOKEN_EOF) {
        match p.current() {
            TOKEN_FUNC => func_decl(p),
            TOKEN_VAR | TOKEN_CONST | TOKEN_TYPE | TOKEN_IMPORT => gen_decl(p),
            TOKEN_SEMICOLON => {
                p.bump();
                continue;
            }
            _ => {
                p.err_and_bump("expected declaration", &[]);
                continue;
            }
        }
        if !p.eat(TOKEN_SEMICOLON) && !p.at(TOKEN_EOF) {
            p.error("expected ';' after top level declaration".to_string());
            let mut recovery = DECL_START.to_vec();
            recovery.push(TOKEN_SEMICOLON);
            p.skip_until(&recovery);
        }
    }
}

/// `import`, `const`, `var` and `type` declarations, single or grouped
pub(super) fn gen_decl(p: &mut Parser) {
    let (decl, spec): (SyntaxKind, fn(&mut Parser)) = match p.current() {
        TOKEN_IMPORT => (NODE_IMPORT_DECL, import_spec),
        TOKEN_CONST => (NODE_CONST_DECL, const_spec),
        TOKEN_VAR => (NODE_VAR_DECL, var_spec),
        _ => (NODE_TYPE_DECL, type_spec),
    };
    p.start(decl);
    p.bump();
    if p.eat(TOKEN_L_PAREN) {
        while !p.at(TOKEN_R_PAREN) && !p.at(TOKEN_EOF) {
            if p.eat(TOKEN_SEMICOLON) {
                continue;
            }
            spec(p);
            if !p.at(TOKEN_R_PAREN) && !p.eat(TOKEN_SEMICOLON) {
                p.error("expected ';' or ')' after specification".to_string());
                p.skip_until(&[TOKEN_SEMICOLON, TOKEN_R_PAREN]);
            }
        }
        p.expect(TOKEN_R_PAREN);
    } else {
        spec(p);
    }
    p.finish();
}

fn import_spec(p: &mut Parser) {
    p.start(NODE_IMPORT_SPEC);
    if p.at(TOKEN_IDENT) {
        name(p);
    } else {
        p.eat(TOKEN_DOT);
    }
    if !p.eat(TOKEN_STRING) && !p.eat(TOKEN_RAW_STRING) {
        p.err_and_bump("expected import path", &[TOKEN_SEMICOLON, TOKEN_R_PAREN]);
    }
    p.finish();
}

fn at_spec_end(p: &Parser) -> bool {
    p.at_any(&[TOKEN_SEMICOLON, TOKEN_R_PAREN, TOKEN_EOF])
}

fn const_spec(p: &mut Parser) {
    value_spec(p, NODE_CONST_SPEC);
}

fn var_spec(p: &mut Parser) {
    value_spec(p, NODE_VAR_SPEC);
}

fn value_spec(p: &mut Parser, kind: SyntaxKind) {
    p.start(kind);
    name_list(p);
    if !p.at(TOKEN_ASSIGN) && !at_spec_end(p) {
        types::type_(p);
    }
    if p.eat(TOKEN_ASSIGN) {
        exprs::expr_list(p);
    }
    p.finish();
}

fn type_spec(p: &mut Parser) {
    p.start(NODE_TYPE_SPEC);
    name(p);
    if p.at(TOKEN_L_BRACK) && at_type_params(p) {
        type_param_list(p);
    }
    p.eat(TOKEN_ASSIGN);
    types::type_(p);
    p.finish();
}

/// `type A[N]int` declares an array, `type A[T any] ...` a generic type
fn at_type_params(p: &Parser) -> bool {
    p.nth(1) == TOKEN_IDENT
        && matches!(
            p.nth(2),
            TOKEN_IDENT
                | TOKEN_COMMA
                | TOKEN_TILDE
                | TOKEN_L_BRACK
                | TOKEN_INTERFACE
                | TOKEN_FUNC
                | TOKEN_MAP
                | TOKEN_CHAN
                | TOKEN_STRUCT
        )
}

fn func_decl(p: &mut Parser) {
    p.start(NODE_FUNC_DECL);
    p.bump();
    if p.at(TOKEN_L_PAREN) {
        p.start(NODE_RECEIVER);
        param_list(p);
        p.finish();
    }
    name(p);
    if p.at(TOKEN_L_BRACK) {
        type_param_list(p);
    }
    signature(p);
    if p.at(TOKEN_L_BRACE) {
        let expr_lev = p.expr_lev;
        p.expr_lev = 0;
        stmts::block(p);
        p.expr_lev = expr_lev;
    }
    p.finish();
}

/// Parameters and optional result of a function, method or function type
pub(super) fn signature(p: &mut Parser) {
    param_list(p);
    if p.at(TOKEN_L_PAREN) {
        p.start(NODE_RESULT);
        param_list(p);
        p.finish();
    } else if types::at_type_start(p) {
        p.start(NODE_RESULT);
        types::type_(p);
        p.finish();
    }
}

pub(super) fn param_list(p: &mut Parser) {
    p.start(NODE_PARAM_LIST);
    p.expect(TOKEN_L_PAREN);
    let named = params_named(p);
    while !p.at_any(&[TOKEN_R_PAREN, TOKEN_EOF, TOKEN_L_BRACE, TOKEN_SEMICOLON]) {
        param(p, named);
        if !p.eat(TOKEN_COMMA) {
            break;
        }
    }
    p.expect(TOKEN_R_PAREN);
    p.finish();
}

/// Either every parameter of a list is named or none is. Scan the list
/// for an entry of the form `name Type`.
fn params_named(p: &Parser) -> bool {
    let mut i = 0;
    loop {
        if p.nth(i) == TOKEN_IDENT {
            let named = match p.nth(i + 1) {
                TOKEN_IDENT | TOKEN_MUL | TOKEN_L_PAREN | TOKEN_FUNC | TOKEN_MAP | TOKEN_CHAN
                | TOKEN_STRUCT | TOKEN_INTERFACE | TOKEN_ELLIPSIS | TOKEN_ARROW => true,
                // `a []T` and `a [N]T`, but not the instantiation `T[int]`
                TOKEN_L_BRACK => p
                    .matching_bracket(i + 1)
                    .map_or(false, |close| {
                        !matches!(p.nth(close + 1), TOKEN_COMMA | TOKEN_R_PAREN)
                    }),
                _ => false,
            };
            if named {
                return true;
            }
        }

        // skip to the next entry
        let mut depth = 0usize;
        loop {
            match p.nth(i) {
                TOKEN_L_PAREN | TOKEN_L_BRACK | TOKEN_L_BRACE => depth += 1,
                TOKEN_R_PAREN | TOKEN_R_BRACK | TOKEN_R_BRACE => {
                    if depth == 0 {
                        return false;
                    }
                    depth -= 1;
                }
                TOKEN_COMMA if depth == 0 => {
                    i += 1;
                    break;
                }
                TOKEN_EOF => return false,
                _ => {}
            }
            i += 1;
        }
    }
}

fn param(p: &mut Parser, named: bool) {
    p.start(NODE_PARAM);
    if named {
        // `a, b int` groups all names in front of one type
        loop {
            name(p);
            if p.at(TOKEN_COMMA) && p.nth(1) == TOKEN_IDENT {
                p.bump();
                continue;
            }
            break;
        }
        if p.at_any(&[TOKEN_COMMA, TOKEN_R_PAREN]) {
            p.error("missing parameter type".to_string());
        } else {
            p.eat(TOKEN_ELLIPSIS);
            types::type_(p);
        }
    } else {
        p.eat(TOKEN_ELLIPSIS);
        types::type_(p);
    }
    p.finish();
}

fn type_param_list(p: &mut Parser) {
    p.start(NODE_TYPE_PARAM_LIST);
    p.bump();
    while p.at(TOKEN_IDENT) {
        p.start(NODE_TYPE_PARAM);
        loop {
            name(p);
            if p.at(TOKEN_COMMA) && p.nth(1) == TOKEN_IDENT {
                p.bump();
                continue;
            }
            break;
        }
        types::type_elem(p);
        p.finish();
        if !p.eat(TOKEN_COMMA) {
            break;
        }
    }
    p.expect(TOKEN_R_BRACK);
    p.finish();
}

/// A declaring identifier
pub(super) fn name(p: &mut Parser) {
    if p.at(TOKEN_IDENT) {
        p.start(NODE_NAME);
        p.bump();
        p.finish();
    } else {
        p.err_and_bump(
            "expected identifier",
            &[TOKEN_SEMICOLON, TOKEN_R_PAREN, TOKEN_R_BRACE, TOKEN_L_BRACE],
        );
    }
}

pub(super) fn name_list(p: &mut Parser) {
    name(p);
    while p.at(TOKEN_COMMA) && p.nth(1) == TOKEN_IDENT {
        p.bump();
        name(p);
    }
}

/// An identifier that refers to a declaration
pub(super) fn name_ref(p: &mut Parser) {
    p.start(NODE_NAME_REF);
    p.bump();
    p.finish();
}

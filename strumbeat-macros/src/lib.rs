use proc_macro::TokenStream;
use quote::quote;
use syn::{LitStr, parse_macro_input};

/// Builds an array of `Strum`s at compile time from a string literal.
///
/// The notation is parsed while compiling, so a typo in a hard-coded pattern
/// is a compile error instead of a runtime `PatternError`.
///
/// # Format
///
/// - `D` / `d` - down strum
/// - `U` / `u` - up strum
/// - `-`, `.`, `R`, `r` - rest
/// - `X`, `x`, `M`, `m` - muted strum
/// - whitespace and `|` are ignored, so bar lines can be written out
///
/// # Examples
///
/// ```ignore
/// use strumbeat::strums;
///
/// // Folk strum: D - U D U D U -
/// let folk = strums!("D-UD UDU-");
/// assert_eq!(folk.len(), 8);
///
/// // Bar lines are allowed
/// let rock = strums!("DXDU | DUDU");
/// ```
#[proc_macro]
pub fn strums(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as LitStr);
    let notation = input.value();

    match parse_notation(&notation) {
        Ok(symbols) => {
            let variants = symbols.iter().map(|symbol| {
                let ident = syn::Ident::new(symbol.variant_name(), proc_macro2::Span::call_site());
                quote! { ::strumbeat::Strum::#ident }
            });

            let expanded = quote! {
                [#(#variants),*]
            };

            TokenStream::from(expanded)
        }
        Err(e) => {
            let error_msg = format!("Invalid strum pattern '{}': {}", notation, e);
            let expanded = quote! {
                compile_error!(#error_msg)
            };
            TokenStream::from(expanded)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Symbol {
    Down,
    Up,
    Rest,
    Muted,
}

impl Symbol {
    fn variant_name(&self) -> &'static str {
        match self {
            Symbol::Down => "Down",
            Symbol::Up => "Up",
            Symbol::Rest => "Rest",
            Symbol::Muted => "Muted",
        }
    }
}

fn parse_symbol(c: char) -> Option<Symbol> {
    match c {
        'D' | 'd' => Some(Symbol::Down),
        'U' | 'u' => Some(Symbol::Up),
        '-' | '.' | 'R' | 'r' => Some(Symbol::Rest),
        'X' | 'x' | 'M' | 'm' => Some(Symbol::Muted),
        _ => None,
    }
}

fn parse_notation(s: &str) -> Result<Vec<Symbol>, String> {
    let mut symbols = Vec::new();

    for (position, c) in s.chars().enumerate() {
        if c.is_whitespace() || c == '|' {
            continue;
        }
        match parse_symbol(c) {
            Some(symbol) => symbols.push(symbol),
            None => return Err(format!("unknown symbol '{}' at position {}", c, position)),
        }
    }

    if symbols.is_empty() {
        return Err("pattern has no strums".to_string());
    }

    Ok(symbols)
}

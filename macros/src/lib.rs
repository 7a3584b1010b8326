use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::parse::{Parse, ParseStream, Result};
use syn::punctuated::Punctuated;
use syn::{parse_macro_input, Expr, Ident, Token};

// Comma separated parser expressions, with an optional trailing comma.
struct Args(Punctuated<Expr, Token![,]>);

impl Parse for Args {
    fn parse(input: ParseStream) -> Result<Self> {
        Punctuated::parse_terminated(input).map(Self)
    }
}

fn elem(idx: usize) -> Ident {
    Ident::new(&format!("__knit_seq_elem_{idx}"), Span::call_site())
}

#[proc_macro]
pub fn seq(args: TokenStream) -> TokenStream {
    let Args(args) = parse_macro_input!(args as Args);
    let args: Vec<_> = args.into_iter().collect();
    if args.is_empty() {
        return quote! {
            { ::knit::combinator::constant(|| ()) }
        }
        .into();
    }
    let pairs = seq_pairs(&args[..]);
    let pattern = seq_pattern(0, args.len());
    let vars = (0..args.len()).map(elem);
    quote! {
        {
            ::knit::combinator::map({ #pairs }, |#pattern| (#(#vars,)*))
        }
    }
    .into()
}

fn seq_pairs(args: &[Expr]) -> proc_macro2::TokenStream {
    if args.len() == 1 {
        let arg = &args[0];
        quote! {
            { #arg }
        }
    } else {
        let mid = args.len() / 2;
        let left = seq_pairs(&args[..mid]);
        let right = seq_pairs(&args[mid..]);
        quote! {
            { ::knit::sequence::pair(#left, #right) }
        }
    }
}

fn seq_pattern(start: usize, end: usize) -> proc_macro2::TokenStream {
    let len = end - start;
    if len == 1 {
        let var = elem(start);
        quote! { #var }
    } else {
        let mid = start + (len / 2);
        let left = seq_pattern(start, mid);
        let right = seq_pattern(mid, end);
        quote! { ::knit::PairContainer { left: #left, right: #right } }
    }
}

#[proc_macro]
pub fn alt(args: TokenStream) -> TokenStream {
    let Args(args) = parse_macro_input!(args as Args);
    let args: Vec<_> = args.into_iter().collect();
    if args.is_empty() {
        return quote! {
            { ::knit::combinator::fail("alternative") }
        }
        .into();
    }
    alt_impl(&args[..]).into()
}

fn alt_impl(args: &[Expr]) -> proc_macro2::TokenStream {
    if args.len() == 1 {
        let arg = &args[0];
        quote! {
            { #arg }
        }
    } else {
        let mid = args.len() / 2;
        let first = alt_impl(&args[..mid]);
        let second = alt_impl(&args[mid..]);
        quote! {
            { ::knit::branch::either(#first, #second) }
        }
    }
}

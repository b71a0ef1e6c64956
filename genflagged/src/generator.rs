//! Rendering an emission plan into source text.
//!
//! The plan is assembled into a token stream and formatted through
//! `prettyplease`. If the stream ever fails to re-parse, the unformatted
//! tokens are written instead so the output can still be compiled and
//! analyzed; that is an internal bug, not a user error.

use std::collections::BTreeSet;

use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use tracing::warn;

use crate::plan::{FilePlan, FlagSpec, TypePlan};

/// Renders a file plan into formatted source text, header included.
pub fn render(plan: &FilePlan) -> String {
  let header = if plan.command_line.is_empty() {
    "// Code generated by genflagged. DO NOT EDIT.\n\n".to_owned()
  } else {
    format!("// Code generated by \"genflagged {}\". DO NOT EDIT.\n\n", plan.command_line)
  };

  let tokens = file_tokens(plan);
  let body = match syn::parse2::<syn::File>(tokens.clone()) {
    Ok(file) => prettyplease::unparse(&file),
    Err(err) => {
      warn!("internal: generated code does not parse ({err}); writing unformatted");
      tokens.to_string()
    }
  };
  format!("{header}{body}")
}

fn file_tokens(plan: &FilePlan) -> TokenStream {
  let sources: Vec<_> = plan.types.iter().map(|t| &t.source).collect();
  let widths: BTreeSet<usize> = plan.types.iter().map(|t| t.width.bits()).collect();
  let width_idents: Vec<_> = widths.into_iter().map(|bits| format_ident!("BitFlags{bits}")).collect();
  let types = plan.types.iter().map(type_tokens);

  quote! {
    use flagged::{BitFlags, #(#width_idents),*};

    use super::{#(#sources),*};

    #(#types)*
  }
}

fn type_tokens(t: &TypePlan) -> TokenStream {
  let source = &t.source;
  let out = &t.out;
  let flagged_ty = format_ident!("BitFlags{}", t.width.bits());

  let type_doc = format!("Compact bitflags form of [`{source}`], one bit per bool field.");
  let typed_doc = format!("Materializes these flags as a [`{source}`] value.");
  let set_typed_doc = format!("Overwrites every flag from the fields of a [`{source}`] value.");

  let typed_inits = t.flags.iter().enumerate().map(|(idx, f)| {
    let field = &f.field;
    let idx = Literal::usize_unsuffixed(idx);
    quote! { #field: self.0.is(#idx) }
  });
  let typed_body = if t.exhaustive {
    quote! { #source { #(#typed_inits),* } }
  } else {
    // Non-flag fields keep their default values.
    quote! { #source { #(#typed_inits,)* ..Default::default() } }
  };
  let typed_sets = t.flags.iter().enumerate().map(|(idx, f)| {
    let field = &f.field;
    let idx = Literal::usize_unsuffixed(idx);
    quote! { self.0.set_to(#idx, flags.#field); }
  });
  let accessors = t.flags.iter().enumerate().map(|(idx, flag)| accessor_tokens(idx, flag));

  quote! {
    #[doc = #type_doc]
    #[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
    pub struct #out(#flagged_ty);

    impl #out {
      /// Generic view over the underlying flags.
      pub fn bit_flags(&mut self) -> &mut dyn BitFlags {
        &mut self.0
      }

      #[doc = #typed_doc]
      pub fn typed_flags(&self) -> #source {
        #typed_body
      }

      #[doc = #set_typed_doc]
      pub fn set_typed_flags(&mut self, flags: #source) {
        #(#typed_sets)*
      }

      #(#accessors)*
    }

    impl core::convert::From<#source> for #out {
      fn from(flags: #source) -> Self {
        let mut out = Self::default();
        out.set_typed_flags(flags);
        out
      }
    }

    impl core::convert::From<#out> for #source {
      fn from(flags: #out) -> Self {
        flags.typed_flags()
      }
    }

    impl core::fmt::Display for #out {
      fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
      }
    }
  }
}

fn accessor_tokens(idx: usize, flag: &FlagSpec) -> TokenStream {
  let name = &flag.flag;
  let snake = snake_case(name);
  let is_fn = format_ident!("is_{snake}");
  let set_fn = format_ident!("set_{snake}");
  let reset_fn = format_ident!("reset_{snake}");
  let set_to_fn = format_ident!("set_{snake}_to");
  let toggle_fn = format_ident!("toggle_{snake}");
  let idx = Literal::usize_unsuffixed(idx);

  let is_doc = format!("Reports whether the {name} flag is set.");
  let set_doc = format!("Sets the {name} flag to true, returning its old value.");
  let reset_doc = format!("Sets the {name} flag to false, returning its old value.");
  let set_to_doc = format!("Sets the {name} flag to `value`, returning its old value.");
  let toggle_doc = format!("Toggles the {name} flag, returning its new value.");

  quote! {
    #[doc = #is_doc]
    pub fn #is_fn(&self) -> bool {
      self.0.is(#idx)
    }

    #[doc = #set_doc]
    pub fn #set_fn(&mut self) -> bool {
      self.0.set(#idx)
    }

    #[doc = #reset_doc]
    pub fn #reset_fn(&mut self) -> bool {
      self.0.reset(#idx)
    }

    #[doc = #set_to_doc]
    pub fn #set_to_fn(&mut self, value: bool) -> bool {
      self.0.set_to(#idx, value)
    }

    #[doc = #toggle_doc]
    pub fn #toggle_fn(&mut self) -> bool {
      self.0.toggle(#idx)
    }
  }
}

/// Method-name form of a derived flag name.
fn snake_case(name: &str) -> String {
  let mut out = String::with_capacity(name.len() + 4);
  for (i, c) in name.chars().enumerate() {
    if c.is_uppercase() {
      if i != 0 && !out.ends_with('_') {
        out.push('_');
      }
      out.extend(c.to_lowercase());
    } else {
      out.push(c);
    }
  }
  out
}

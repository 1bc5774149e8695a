use crate::support::load_declaration_or_exit;
use canon_kernel::SignaturePolicy;

pub fn run(declaration: String, with_annotations: bool) {
    let decl = load_declaration_or_exit(&declaration);
    let policy = SignaturePolicy {
        include_annotations: with_annotations,
    };
    println!("{}", decl.signature_with(policy));
}

//! Per-chain address equality.

use crate::chain::VmType;

/// Compare two addresses under the rules of the chain's VM.
///
/// SVM and BVM encodings are case-significant and compare exactly. Every
/// other VM type, including unrecognised tags, compares case-insensitively.
/// The input's own format is never re-checked here.
pub fn addresses_match(a: &str, b: &str, vm_type: &VmType) -> bool {
    if vm_type.is_case_sensitive() {
        a == b
    } else {
        a.to_lowercase() == b.to_lowercase()
    }
}

/// [`addresses_match`] with the VM given as its raw tag.
pub fn addresses_match_tag(a: &str, b: &str, vm_tag: &str) -> bool {
    addresses_match(a, b, &VmType::parse(vm_tag))
}

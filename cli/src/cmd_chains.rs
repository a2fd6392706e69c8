//! `relaycheck chains` — list the chain configuration the detector scans.

use anyhow::{Context, Result};

use relaycheck_core::{Chain, ChainSource};

pub async fn run(source: Box<dyn ChainSource>, as_json: bool) -> Result<()> {
    let chains = source
        .fetch_chains()
        .await
        .with_context(|| format!("fetching chains from {}", source.url()))?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&chains)?);
    } else {
        print!("{}", render(&chains));
    }
    Ok(())
}

pub fn render(chains: &[Chain]) -> String {
    let mut out = format!(
        "{:>12}  {:<24} {:<6} {:>7}  {:<10} {:>9}\n",
        "ID", "NAME", "VM", "SOLVERS", "DEPOSITORY", "CONTRACTS"
    );
    for chain in chains {
        let vm = if chain.vm_type.as_str().is_empty() { "-" } else { chain.vm_type.as_str() };
        out.push_str(&format!(
            "{:>12}  {:<24} {:<6} {:>7}  {:<10} {:>9}\n",
            chain.id,
            chain.name,
            vm,
            chain.solver_addresses.len(),
            if chain.depository().is_some() { "yes" } else { "no" },
            chain.contract_count()
        ));
    }
    out.push_str(&format!("\n{} chains\n", chains.len()));
    out
}

//! `relaycheck check` — run a detection and print the result.

use anyhow::{Context, Result};

use relaycheck_core::{
    format_contract_type, truncate_address, AddressMatch, ChainSource, ContractCategory,
    DetectionResult, Detector,
};

pub async fn run(source: Box<dyn ChainSource>, address: &str, as_json: bool, full: bool) -> Result<()> {
    let label = source.url().to_string();
    let detector = Detector::new(source);
    let result = detector
        .check(address)
        .await
        .with_context(|| format!("checking address against {label}"))?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render(&result, full));
    }
    Ok(())
}

/// Human-readable report. Addresses are shortened unless `full` is set.
pub fn render(result: &DetectionResult, full: bool) -> String {
    let groups = result.groups();
    let mut out = format!("{}\n  address: {}\n", groups.title(), result.address());
    if groups.is_empty() {
        out.push_str("\nNo solver, depository or contract entry matches this address.\n");
        return out;
    }
    out.push_str(&format!("\n{}\n", groups.summary()));

    if !groups.solvers.is_empty() {
        out.push_str(&format!("\nSolver ({})\n", groups.solvers.len()));
        for m in &groups.solvers {
            out.push_str(&match_line(m, full));
        }
    }

    if !groups.depositories.is_empty() {
        out.push_str(&format!("\nDepository v2 ({})\n", groups.depositories.len()));
        for m in &groups.depositories {
            out.push_str(&match_line(m, full));
        }
    }

    if !groups.contracts.is_empty() {
        out.push_str(&format!("\nContracts ({})\n", groups.contract_match_count()));
        for (path, matches) in &groups.contracts {
            out.push_str(&format!(
                "  {} [{}] {}\n",
                format_contract_type(path),
                ContractCategory::from_path(path),
                path
            ));
            for m in matches {
                out.push_str("  ");
                out.push_str(&match_line(m, full));
            }
        }
    }
    out
}

fn match_line(m: &AddressMatch, full: bool) -> String {
    let address = if full {
        m.address.clone()
    } else {
        truncate_address(&m.address)
    };
    let chain = format!("{} ({})", m.chain_label(), m.chain_id);
    match m.explorer_link() {
        Some(link) => format!("  {chain:<28} {address}  {link}\n"),
        None => format!("  {chain:<28} {address}\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relaycheck_core::{match_chains, parse_chains};

    const CHAINS: &str = r#"[
        {"id":1,"name":"ethereum","displayName":"Ethereum","explorerUrl":"https://etherscan.io","vmType":"evm",
         "solverAddresses":["0xf70da97812CB96acDF810712Aa562db8dfA3dbEF"],
         "contracts":{"v3":{"erc20Router":"0xf70da97812cb96acdf810712aa562db8dfa3dbef"}}},
        {"id":1337,"name":"devnet","solverAddresses":["0xF70DA97812CB96ACDF810712AA562DB8DFA3DBEF"]}
    ]"#;

    fn result(address: &str) -> DetectionResult {
        let chains = parse_chains(CHAINS).unwrap();
        DetectionResult::new(address, match_chains(&chains, address))
    }

    #[test]
    fn renders_groups_with_links() {
        let text = render(&result("0xf70da97812cb96acdf810712aa562db8dfa3dbef"), false);
        assert!(text.starts_with("Relay Protocol Solver & Contract Address\n"));
        assert!(text.contains("\nSolver (2)\n"));
        assert!(text.contains("https://etherscan.io/address/0xf70da97812CB96acDF810712Aa562db8dfA3dbEF"));
        assert!(text.contains("V3 ERC20 Router [router] v3.erc20Router"));
        assert!(text.contains("0xf70d...dbEF"));
        assert!(text.contains("devnet (1337)"));
    }

    #[test]
    fn full_flag_keeps_addresses_whole() {
        let text = render(&result("0xf70da97812cb96acdf810712aa562db8dfa3dbef"), true);
        assert!(text.contains("0xF70DA97812CB96ACDF810712AA562DB8DFA3DBEF"));
        assert!(!text.contains("..."));
    }

    #[test]
    fn depository_section_layout() {
        let chains = parse_chains(
            r#"[{"id":1,"name":"ethereum","displayName":"Ethereum","explorerUrl":"https://etherscan.io/",
                 "protocol":{"v2":{"depository":"0x4cD00E387622C35bDDB9b4c962C136462338BC31"}}}]"#,
        )
        .unwrap();
        let address = "0x4cD00E387622C35bDDB9b4c962C136462338BC31";
        let text = render(&DetectionResult::new(address, match_chains(&chains, address)), false);
        let expected = format!(
            "Relay Protocol Depository Address\n  address: {address}\n\n\
             This address was found in 1 match across Relay Protocol chains. \
             It is a v2 depository contract on 1 chain.\n\n\
             Depository v2 (1)\n  {:<28} 0x4cD0...BC31  https://etherscan.io/address/{address}\n",
            "Ethereum (1)"
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn renders_miss() {
        let text = render(&result("0x000000000000000000000000000000000000dEaD"), false);
        assert!(text.starts_with("Not Part of Relay Protocol\n"));
        assert!(text.contains("No solver, depository or contract entry"));
    }
}

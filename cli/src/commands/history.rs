use shared::history::HISTORY_HEADER;
use shared::ConversionRecord;

use crate::state::{AppState, HandlerResult};

pub fn handle_history(state: &AppState) -> HandlerResult {
    let records = state.history.load()?;
    print!("{}", render_history(&records));
    Ok(())
}

fn render_history(records: &[ConversionRecord]) -> String {
    if records.is_empty() {
        return "No history found!\n".to_string();
    }

    let mut out = HISTORY_HEADER.join("\t");
    out.push('\n');
    for r in records {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\n",
            r.base_currency, r.target_currency, r.amount, r.result
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history() {
        assert_eq!(render_history(&[]), "No history found!\n");
    }

    #[test]
    fn test_tab_separated_rows() {
        let records = vec![ConversionRecord {
            base_currency: "USD".into(),
            target_currency: "EUR".into(),
            amount: 100.0,
            result: 90.0,
        }];
        assert_eq!(
            render_history(&records),
            "Base Currency\tTarget Currency\tAmount\tResult\nUSD\tEUR\t100\t90\n"
        );
    }
}

//! Result rendering for the terminal

use crate::config::OutputFormat;
use rift_core::{Currency, CurrencyMap, RewardPool};
use rift_economics::{to_csv, RewardResult};

/// Render a result in the requested format
pub fn render(result: &RewardResult, pool: &RewardPool, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Table => render_table(result, pool),
        OutputFormat::Csv => to_csv(result),
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
    })
}

fn amount_cells<T: ToString>(amounts: &CurrencyMap<T>) -> String {
    amounts
        .iter()
        .map(|(_, amount)| format!("{:>10}", amount.to_string()))
        .collect::<Vec<_>>()
        .join("")
}

/// Plain-text table; totals above the pool are marked with `!`
pub fn render_table(result: &RewardResult, pool: &RewardPool) -> String {
    let mut lines = Vec::with_capacity(result.len() + 4);

    let headers = Currency::ALL
        .iter()
        .map(|c| format!("{:>10}", c.name()))
        .collect::<String>();
    lines.push(format!("{:<6}{:<24}{:>8}{}", "Rank", "Name", "Damage", headers));

    for (rank, allocation) in result.rewards.iter().enumerate() {
        let marker = if allocation.received_min_rewards { "*" } else { "" };
        lines.push(format!(
            "{:<6}{:<24}{:>8}{}",
            rank + 1,
            format!("{}{}", allocation.name, marker),
            format!("{}%", allocation.damage),
            amount_cells(&allocation.rewards),
        ));
    }

    let over = result.over_allocated(pool);
    let totals = result.total_rewarded.map(|currency, total| {
        if over.contains(&currency) {
            format!("{total}!")
        } else {
            total.to_string()
        }
    });

    lines.push(format!("{:<38}{}", "Total", amount_cells(&totals)));
    lines.push(format!("{:<38}{}", "Pool", amount_cells(pool)));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rift_core::Participant;
    use rift_economics::allocate;

    #[test]
    fn test_table_marks_minimums_and_overruns() {
        let pool = RewardPool::new(10.0, 100.0, 20.0, 1.0);
        let result = allocate(
            &pool,
            &[Participant::new("a", "Alice", 55.0), Participant::new("b", "Bob", 40.0)],
        );

        let table = render_table(&result, &pool);
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Rank"));
        assert!(lines[1].contains("Alice*"));
        assert!(lines[1].contains("55%"));
        assert!(lines[3].starts_with("Total"));
        assert!(lines[3].trim_end().ends_with("2!"));
        assert!(lines[4].starts_with("Pool"));
    }

    #[test]
    fn test_json_output() {
        let pool = RewardPool::new(100.0, 1000.0, 200.0, 10.0);
        let result = allocate(&pool, &[Participant::new("a", "Alice", 100.0)]);

        let json = render(&result, &pool, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_rewarded"]["dust"], 1000);
        assert_eq!(value["rewards"][0]["name"], "Alice");
    }

    #[test]
    fn test_csv_output() {
        let pool = RewardPool::new(100.0, 1000.0, 200.0, 10.0);
        let result = allocate(&pool, &[Participant::new("a", "Alice", 100.0)]);

        let csv = render(&result, &pool, OutputFormat::Csv).unwrap();
        assert!(csv.starts_with("name,damage,token,dust,contract,tome\n"));
    }
}

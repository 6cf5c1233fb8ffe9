use chrono::Datelike;
use serde::Serialize;

use crate::movement::{Movement, MovementKind};

/// Short month labels used by the dashboard and reports.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Movement totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyMovements {
    /// 1-based month number.
    pub month: u32,
    pub label: &'static str,
    pub entrada: u64,
    pub saida: u64,
    /// entrada − saida, saturating at the `i64` range.
    pub net: i64,
}

/// Twelve rows, January first, for movements dated in `year` (UTC).
pub fn monthly_movements(movements: &[Movement], year: i32) -> Vec<MonthlyMovements> {
    let mut rows: Vec<MonthlyMovements> = MONTH_LABELS
        .iter()
        .zip(1u32..)
        .map(|(&label, month)| MonthlyMovements {
            month,
            label,
            entrada: 0,
            saida: 0,
            net: 0,
        })
        .collect();

    for movement in movements.iter().filter(|m| m.date.year() == year) {
        let row = &mut rows[movement.date.month0() as usize];
        match movement.kind {
            MovementKind::Entrada => row.entrada = row.entrada.saturating_add(movement.quantity),
            MovementKind::Saida => row.saida = row.saida.saturating_add(movement.quantity),
        }
    }

    for row in &mut rows {
        let net = i128::from(row.entrada) - i128::from(row.saida);
        row.net = i64::try_from(net).unwrap_or(if net < 0 { i64::MIN } else { i64::MAX });
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::tests::movement_at;
    use chrono::{TimeZone, Utc};
    use stockroom_core::ProductId;

    #[test]
    fn march_totals_and_net() {
        let p = ProductId::new();
        let march = Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();
        let movements = vec![
            movement_at(p, MovementKind::Entrada, 50, march),
            movement_at(p, MovementKind::Saida, 30, march),
        ];

        let rows = monthly_movements(&movements, 2026);

        assert_eq!(rows.len(), 12);
        let mar = &rows[2];
        assert_eq!(mar.label, "Mar");
        assert_eq!(mar.month, 3);
        assert_eq!(mar.entrada, 50);
        assert_eq!(mar.saida, 30);
        assert_eq!(mar.net, 20);
        assert!(rows.iter().filter(|r| r.month != 3).all(|r| r.entrada == 0 && r.saida == 0));
    }

    #[test]
    fn other_years_are_ignored() {
        let p = ProductId::new();
        let last_year = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        let movements = vec![movement_at(p, MovementKind::Entrada, 50, last_year)];

        let rows = monthly_movements(&movements, 2026);

        assert!(rows.iter().all(|r| r.entrada == 0));
    }

    #[test]
    fn huge_months_saturate() {
        let p = ProductId::new();
        let may = Utc.with_ymd_and_hms(2026, 5, 2, 8, 0, 0).unwrap();
        let june = Utc.with_ymd_and_hms(2026, 6, 2, 8, 0, 0).unwrap();
        let movements = vec![
            movement_at(p, MovementKind::Entrada, u64::MAX, may),
            movement_at(p, MovementKind::Entrada, 1, may),
            movement_at(p, MovementKind::Saida, u64::MAX, june),
        ];

        let rows = monthly_movements(&movements, 2026);

        assert_eq!(rows[4].entrada, u64::MAX);
        assert_eq!(rows[4].net, i64::MAX);
        assert_eq!(rows[5].net, i64::MIN);
    }

    #[test]
    fn net_can_be_negative() {
        let p = ProductId::new();
        let dec = Utc.with_ymd_and_hms(2026, 12, 31, 23, 59, 0).unwrap();
        let movements = vec![movement_at(p, MovementKind::Saida, 7, dec)];

        let rows = monthly_movements(&movements, 2026);

        assert_eq!(rows[11].label, "Dez");
        assert_eq!(rows[11].net, -7);
    }
}

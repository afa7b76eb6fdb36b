//! Four-panel chart of a finished table, rendered to SVG
//!
//! Panels: demand vs availability, service level per group, community
//! acceptance, and priority service vs acceptance colored by general service.

use crate::{
    Error, ModelConfig, RationingTable, Result, TableRow, LITERS_PER_THOUSAND, MONTH_LABELS,
    NUM_MONTHS,
};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

pub const CHART_SIZE: (u32, u32) = (1800, 1200);

const DEMAND_COLOR: RGBColor = RGBColor(0xE6, 0x39, 0x46);
const AVAILABILITY_COLOR: RGBColor = RGBColor(0x2A, 0x9D, 0x8F);
const REFERENCE_COLOR: RGBColor = RGBColor(0x80, 0x80, 0x80);
const PRIORITY_COLOR: RGBColor = RGBColor(0xF4, 0xA2, 0x61);
const GENERAL_COLOR: RGBColor = RGBColor(0x26, 0x46, 0x53);
const ACCEPTANCE_FILL: RGBColor = RGBColor(0x8E, 0xCA, 0xE6);
const ACCEPTANCE_LINE: RGBColor = RGBColor(0x21, 0x9E, 0xBC);

// Viridis anchor colors, low to high
const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

const BAR_WIDTH: f64 = 0.35;
const MONTH_AXIS: std::ops::Range<f64> = -0.5..(NUM_MONTHS as f64 - 0.5);

type DrawResult<DB> =
    std::result::Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Render the dashboard to an SVG file
pub fn render_svg<P: AsRef<Path>>(
    table: &RationingTable,
    config: &ModelConfig,
    path: P,
) -> Result<()> {
    let root = SVGBackend::new(path.as_ref(), CHART_SIZE).into_drawing_area();
    draw_dashboard(&root, table, config).map_err(|e| Error::Chart(e.to_string()))?;
    root.present().map_err(|e| Error::Chart(e.to_string()))
}

/// Render the dashboard to an SVG document in memory
pub fn render_svg_string(table: &RationingTable, config: &ModelConfig) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        draw_dashboard(&root, table, config).map_err(|e| Error::Chart(e.to_string()))?;
        root.present().map_err(|e| Error::Chart(e.to_string()))?;
    }
    Ok(svg)
}

/// Draw all four panels on any plotters backend
pub fn draw_dashboard<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    table: &RationingTable,
    config: &ModelConfig,
) -> DrawResult<DB> {
    root.fill(&WHITE)?;
    let root = root.titled(
        "Stochastic Determinism and Agency: Community Water Crisis Under Ethical Rationing",
        ("sans-serif", 30),
    )?;

    let rows = table.rows();
    let panels = root.split_evenly((2, 2));
    draw_supply_panel(&panels[0], &rows, config)?;
    draw_service_panel(&panels[1], &rows)?;
    draw_acceptance_panel(&panels[2], &rows)?;
    draw_correlation_panel(&panels[3], &rows)?;
    Ok(())
}

/// Month label for integer axis positions, empty elsewhere
fn month_label(x: &f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 || rounded >= NUM_MONTHS as f64 {
        return String::new();
    }
    MONTH_LABELS[rounded as usize].to_string()
}

fn series<F>(rows: &[TableRow], select: F) -> Vec<(f64, f64)>
where
    F: Fn(&TableRow) -> f64,
{
    rows.iter()
        .enumerate()
        .map(|(m, row)| (m as f64, select(row)))
        .collect()
}

fn draw_supply_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    rows: &[TableRow],
    config: &ModelConfig,
) -> DrawResult<DB> {
    let demand = series(rows, |r| r.demand);
    let availability = series(rows, |r| r.availability);
    let baseline = config.baseline_demand / LITERS_PER_THOUSAND;

    let y_max = demand
        .iter()
        .chain(&availability)
        .map(|&(_, y)| y)
        .fold(baseline, f64::max)
        * 1.15;

    let mut chart = ChartBuilder::on(area)
        .caption("Demand vs. Water Availability", ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(MONTH_AXIS, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_labels(NUM_MONTHS)
        .x_label_formatter(&month_label)
        .y_desc("Water (thousand liters)")
        .draw()?;

    chart
        .draw_series(LineSeries::new(demand.iter().copied(), DEMAND_COLOR.stroke_width(2)))?
        .label("Demand")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], DEMAND_COLOR.stroke_width(2)));
    chart.draw_series(demand.iter().map(|&p| Circle::new(p, 4, DEMAND_COLOR.filled())))?;

    chart
        .draw_series(LineSeries::new(
            availability.iter().copied(),
            AVAILABILITY_COLOR.stroke_width(2),
        ))?
        .label("Availability")
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], AVAILABILITY_COLOR.stroke_width(2))
        });
    chart.draw_series(
        availability
            .iter()
            .map(|&p| Circle::new(p, 5, AVAILABILITY_COLOR.stroke_width(2))),
    )?;

    chart
        .draw_series(LineSeries::new(
            vec![(MONTH_AXIS.start, baseline), (MONTH_AXIS.end, baseline)],
            REFERENCE_COLOR.mix(0.7).stroke_width(1),
        ))?
        .label("Baseline demand")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &REFERENCE_COLOR));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}

fn draw_service_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    rows: &[TableRow],
) -> DrawResult<DB> {
    let mut chart = ChartBuilder::on(area)
        .caption("Service Level by Group (Distributive Justice)", ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(MONTH_AXIS, 0f64..110f64)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(NUM_MONTHS)
        .x_label_formatter(&month_label)
        .y_desc("Service level (%)")
        .draw()?;

    let priority_bars = |row: (usize, &TableRow)| {
        let x = row.0 as f64;
        [(x - BAR_WIDTH, 0.0), (x, row.1.priority_service_level)]
    };
    let general_bars = |row: (usize, &TableRow)| {
        let x = row.0 as f64;
        [(x, 0.0), (x + BAR_WIDTH, row.1.general_service_level)]
    };

    chart
        .draw_series(
            rows.iter()
                .enumerate()
                .map(|r| Rectangle::new(priority_bars(r), PRIORITY_COLOR.filled())),
        )?
        .label("Priority group (children, chronically ill, elderly)")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], PRIORITY_COLOR.filled()));
    chart
        .draw_series(
            rows.iter()
                .enumerate()
                .map(|r| Rectangle::new(general_bars(r), GENERAL_COLOR.filled())),
        )?
        .label("General group")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], GENERAL_COLOR.filled()));

    // outlines
    chart.draw_series(rows.iter().enumerate().flat_map(|r| {
        [
            Rectangle::new(priority_bars(r), BLACK.stroke_width(1)),
            Rectangle::new(general_bars(r), BLACK.stroke_width(1)),
        ]
    }))?;

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}

fn draw_acceptance_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    rows: &[TableRow],
) -> DrawResult<DB> {
    let acceptance = series(rows, |r| r.acceptance);

    let mut chart = ChartBuilder::on(area)
        .caption("Community Acceptance of the Policy", ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(MONTH_AXIS, 0f64..100f64)?;

    chart
        .configure_mesh()
        .x_labels(NUM_MONTHS)
        .x_label_formatter(&month_label)
        .y_desc("Acceptance (%)")
        .draw()?;

    chart.draw_series(
        AreaSeries::new(
            acceptance.iter().copied(),
            0.0,
            ACCEPTANCE_FILL.mix(0.7).filled(),
        )
        .border_style(&ACCEPTANCE_LINE),
    )?;
    chart.draw_series(LineSeries::new(
        acceptance.iter().copied(),
        ACCEPTANCE_LINE.stroke_width(2),
    ))?;
    chart.draw_series(
        acceptance
            .iter()
            .map(|&p| Circle::new(p, 4, ACCEPTANCE_LINE.filled())),
    )?;
    Ok(())
}

fn draw_correlation_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    rows: &[TableRow],
) -> DrawResult<DB> {
    let general: Vec<f64> = rows.iter().map(|r| r.general_service_level).collect();
    let lo = general.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = general.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let mut chart = ChartBuilder::on(area)
        .caption(
            "Priority Service vs. Acceptance (color: general service)",
            ("sans-serif", 22),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..105f64, 0f64..105f64)?;

    chart
        .configure_mesh()
        .x_desc("Priority service level (%)")
        .y_desc("Community acceptance (%)")
        .draw()?;

    chart.draw_series(rows.iter().map(|r| {
        let color = viridis(normalize(r.general_service_level, lo, hi));
        Circle::new(
            (r.priority_service_level, r.acceptance),
            8,
            color.mix(0.8).filled(),
        )
    }))?;
    chart.draw_series(rows.iter().map(|r| {
        Circle::new(
            (r.priority_service_level, r.acceptance),
            8,
            BLACK.stroke_width(1),
        )
    }))?;

    // color scale endpoints as legend entries
    for (value, t) in [(lo, 0.0), (hi, 1.0)] {
        let color = viridis(t);
        chart
            .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())?
            .label(format!("General service {:.1}%", value))
            .legend(move |(x, y)| Circle::new((x + 8, y), 6, color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}

/// Position of `value` within `[lo, hi]`, mid-scale when the range is empty
pub fn normalize(value: f64, lo: f64, hi: f64) -> f64 {
    if hi - lo < 1e-12 {
        return 0.5;
    }
    (value - lo) / (hi - lo)
}

/// Viridis-like color for `t` in [0, 1]
pub fn viridis(t: f64) -> RGBColor {
    let scaled = t.clamp(0.0, 1.0) * (VIRIDIS.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - i as f64;
    let (r0, g0, b0) = VIRIDIS[i];
    let (r1, g1, b1) = VIRIDIS[i + 1];
    let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * frac).round() as u8;
    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulate;

    #[test]
    fn month_labels_only_on_integer_positions() {
        assert_eq!(month_label(&0.0), "Jan");
        assert_eq!(month_label(&11.0), "Dec");
        assert_eq!(month_label(&0.5), "");
        assert_eq!(month_label(&-1.0), "");
        assert_eq!(month_label(&12.0), "");
    }

    #[test]
    fn viridis_endpoints() {
        assert_eq!(viridis(0.0), RGBColor(68, 1, 84));
        assert_eq!(viridis(1.0), RGBColor(253, 231, 37));
        assert_eq!(viridis(0.5), RGBColor(33, 145, 140));
        assert_eq!(viridis(2.0), viridis(1.0));
    }

    #[test]
    fn normalize_handles_flat_range() {
        assert_eq!(normalize(5.0, 5.0, 5.0), 0.5);
        assert_eq!(normalize(7.5, 5.0, 10.0), 0.5);
    }

    #[test]
    fn svg_contains_all_panels() {
        let config = ModelConfig::baseline();
        let svg = render_svg_string(&simulate(&config), &config).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Demand vs. Water Availability"));
        assert!(svg.contains("Service Level by Group"));
        assert!(svg.contains("Community Acceptance of the Policy"));
        assert!(svg.contains("Priority Service vs. Acceptance"));
    }

    #[test]
    fn svg_is_deterministic() {
        let config = ModelConfig::baseline();
        let table = simulate(&config);
        assert_eq!(
            render_svg_string(&table, &config).unwrap(),
            render_svg_string(&table, &config).unwrap()
        );
    }
}

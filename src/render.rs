use crate::chart::{
    AxisScale, ChartConfig, ChartData, ChartKind, ChartOptions, Dataset, DatasetStyle, Plugins,
    Rgba, Scales, Title,
};
use crate::series::StockSeries;

pub const CLOSE_LABEL_SUFFIX: &str = " 收盘价";
pub const PRICE_TITLE_SUFFIX: &str = " 价格走势";
pub const VOLUME_LABEL: &str = "成交量";
pub const VOLUME_TITLE: &str = "交易量趋势";

const PRICE_BORDER: Rgba = Rgba::new(54, 162, 235, 1.0);
const PRICE_FILL: Rgba = Rgba::new(54, 162, 235, 0.1);
const PRICE_TENSION: f64 = 0.1;

const VOLUME_BORDER: Rgba = Rgba::new(75, 192, 192, 1.0);
const VOLUME_FILL: Rgba = Rgba::new(75, 192, 192, 0.5);

/// Closing-price line chart over the series dates.
pub fn price_chart(series: &StockSeries) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: series.dates.clone(),
            datasets: vec![Dataset {
                label: format!("{}{}", series.name, CLOSE_LABEL_SUFFIX),
                data: series.prices.clone(),
                style: DatasetStyle {
                    border_color: PRICE_BORDER,
                    background_color: PRICE_FILL,
                    fill: Some(true),
                    tension: Some(PRICE_TENSION),
                    border_width: None,
                },
            }],
        },
        options: ChartOptions {
            responsive: true,
            plugins: Plugins {
                title: Title {
                    display: true,
                    text: format!("{}{}", series.symbol, PRICE_TITLE_SUFFIX),
                },
            },
            // Prices sit far from zero; let the axis fit the data.
            scales: Some(Scales {
                y: AxisScale { begin_at_zero: false },
            }),
        },
    }
}

/// Traded-volume bar chart over the series dates.
pub fn volume_chart(series: &StockSeries) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: series.dates.clone(),
            datasets: vec![Dataset {
                label: VOLUME_LABEL.to_string(),
                data: series.volumes.clone(),
                style: DatasetStyle {
                    border_color: VOLUME_BORDER,
                    background_color: VOLUME_FILL,
                    fill: None,
                    tension: None,
                    border_width: Some(1),
                },
            }],
        },
        options: ChartOptions {
            responsive: true,
            plugins: Plugins {
                title: Title {
                    display: true,
                    text: VOLUME_TITLE.to_string(),
                },
            },
            scales: None,
        },
    }
}

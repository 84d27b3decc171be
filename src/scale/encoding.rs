use std::f64::consts::PI;

use crate::config::ChartConfig;
use crate::data::model::{Continent, CountryRecord};
use crate::foundation::core::{PlotArea, Rgba8};
use crate::foundation::error::GapminderResult;
use crate::scale::linear::LinearScale;
use crate::scale::log::LogScale;
use crate::scale::ordinal::OrdinalScale;
use crate::scale::ticks::format_plain;

/// Which side of the plot an axis is drawn on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisOrient {
    /// Horizontal axis below the plot, ticks pointing down.
    Bottom,
    /// Vertical axis left of the plot, ticks pointing left.
    Left,
}

/// One labelled tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Domain value.
    pub value: f64,
    /// Offset along the axis in plot pixels.
    pub offset: f64,
    /// Rendered label.
    pub label: String,
}

/// An axis resolved into tick positions and labels.
#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    /// Side of the plot.
    pub orient: AxisOrient,
    /// Extent of the axis line in plot pixels.
    pub extent: [f64; 2],
    /// Ticks in domain order.
    pub ticks: Vec<Tick>,
}

/// Resolved visual channels for one record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Encoded {
    /// Horizontal centre in plot pixels.
    pub cx: f64,
    /// Vertical centre in plot pixels.
    pub cy: f64,
    /// Circle radius in pixels.
    pub r: f64,
    /// Fill colour.
    pub fill: Rgba8,
}

/// The fixed scale registry: x (income), y (life expectancy), area (population), colour
/// (continent), plus the two axes derived from x and y.
#[derive(Clone, Debug)]
pub struct Encodings {
    plot: PlotArea,
    x: LogScale,
    y: LinearScale,
    area: LinearScale,
    color: OrdinalScale<Continent, Rgba8>,
    x_axis: Axis,
    y_axis: Axis,
}

impl Encodings {
    /// Build every scale and axis from configuration constants.
    pub fn from_config(cfg: &ChartConfig) -> GapminderResult<Self> {
        cfg.validate()?;
        let plot = cfg.canvas.plot_area(cfg.margins)?;

        let x = LogScale::new(10.0, cfg.x_domain, [0.0, plot.width])?;
        let y = LinearScale::new(cfg.y_domain, [plot.height, 0.0])?;
        let area = LinearScale::new(cfg.area_domain, cfg.area_range)?;
        let color = OrdinalScale::new(cfg.palette.clone())?.with_domain(Continent::ALL);

        let x_axis = Axis {
            orient: AxisOrient::Bottom,
            extent: x.range(),
            ticks: cfg
                .x_tick_values
                .iter()
                .map(|&v| Tick {
                    value: v,
                    offset: x.map(v),
                    label: format_plain(v),
                })
                .collect(),
        };
        let y_axis = Axis {
            orient: AxisOrient::Left,
            extent: y.range(),
            ticks: y
                .ticks(cfg.y_tick_count)
                .into_iter()
                .map(|v| Tick {
                    value: v,
                    offset: y.map(v),
                    label: format_plain(v),
                })
                .collect(),
        };

        Ok(Self {
            plot,
            x,
            y,
            area,
            color,
            x_axis,
            y_axis,
        })
    }

    /// Plot area the positional scales map into.
    pub fn plot(&self) -> PlotArea {
        self.plot
    }

    /// Income scale.
    pub fn x(&self) -> &LogScale {
        &self.x
    }

    /// Life expectancy scale.
    pub fn y(&self) -> &LinearScale {
        &self.y
    }

    /// Population-to-area scale.
    pub fn area(&self) -> &LinearScale {
        &self.area
    }

    /// Bottom axis.
    pub fn x_axis(&self) -> &Axis {
        &self.x_axis
    }

    /// Left axis.
    pub fn y_axis(&self) -> &Axis {
        &self.y_axis
    }

    /// Circle radius for a population: `sqrt(2 * area(pop) / pi)`.
    ///
    /// The area scale is not clamped, so populations outside its domain extrapolate. An
    /// extrapolated negative area yields 0.
    pub fn radius(&self, population: u64) -> f64 {
        let area = self.area.map(population as f64);
        (2.0 * area / PI).max(0.0).sqrt()
    }

    /// Fill colour for a continent.
    pub fn color(&self, continent: Continent) -> Rgba8 {
        self.color
            .get(&continent)
            .unwrap_or_else(|| self.color.range()[0])
    }

    /// Legend entries in colour-assignment order.
    pub fn legend(&self) -> Vec<(Continent, Rgba8)> {
        self.color
            .domain()
            .iter()
            .map(|&c| (c, self.color(c)))
            .collect()
    }

    /// All visual channels for a record.
    pub fn encode(&self, record: &CountryRecord) -> Encoded {
        Encoded {
            cx: self.x.map(record.income),
            cy: self.y.map(record.life_exp),
            r: self.radius(record.population),
            fill: self.color(record.continent),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scale/encoding.rs"]
mod tests;

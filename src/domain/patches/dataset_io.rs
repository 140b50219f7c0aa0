use super::*;
use crate::domain::dataset::DataSet;

impl Patches {
    /// Resample `data` onto the grid and store it in `var`
    pub fn import_dataset(&mut self, data: &DataSet, var: &str, use_nearest: bool) -> Result<()> {
        let (num_x, num_y) = (self.world.num_x as usize, self.world.num_y as usize);
        let resampled = data.resample(num_x, num_y, use_nearest);
        let column = self.agents.column_mut(var)?;
        for (dst, &src) in column.iter_mut().zip(resampled.data()) {
            *dst = src as f64;
        }
        Ok(())
    }

    /// `var` of every patch as a num_x x num_y dataset
    pub fn export_dataset(&self, var: &str) -> Result<DataSet> {
        let values = self.agents.props(BreedId::BASE, var)?;
        DataSet::new(
            self.world.num_x as usize,
            self.world.num_y as usize,
            values.into_iter().map(|v| v as f32).collect(),
        )
    }

    /// Paint every patch from its `var` through `map` over [min, max]
    pub fn scale_colors(&mut self, var: &str, map: &ColorMap, min: f64, max: f64) -> Result<()> {
        let values = self.agents.props(BreedId::BASE, var)?;
        for (px, v) in self.pixels.data_mut().iter_mut().zip(values) {
            *px = map.scale_color(v, min, max).to_pixel();
        }
        Ok(())
    }
}

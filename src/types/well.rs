//! Well entity: header metadata, the owned log table and the two
//! designated logs (measured depth and zonation).

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::log_table::{CodeRecord, LogTable, LogType, Q_INCL, Q_MDEPTH, R_HLEN};
use crate::error::WellError;
use crate::geometry::{check_output_len, GeometryProvider, TrajectoryBuffers};

// ============================================================================
// Import / Export Shape
// ============================================================================

/// Data contract shared with importers and exporters.
///
/// No file grammar lives here; an importer fills this struct however it
/// reads its source, and [`Well::from_import`] validates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellImport {
    pub name: String,
    #[serde(default)]
    pub xpos: Option<f64>,
    #[serde(default)]
    pub ypos: Option<f64>,
    #[serde(default)]
    pub rkb: Option<f64>,
    pub table: LogTable,
    #[serde(default)]
    pub mdlog: Option<String>,
    #[serde(default)]
    pub zonelog: Option<String>,
    /// Fail when a requested mdlog/zonelog is missing instead of dropping it
    #[serde(default = "default_strict")]
    pub strict: bool,
}

fn default_strict() -> bool {
    true
}

// ============================================================================
// Well
// ============================================================================

/// A single well with its log table
#[derive(Debug, Clone)]
pub struct Well {
    name: String,
    xpos: Option<f64>,
    ypos: Option<f64>,
    rkb: Option<f64>,
    table: LogTable,
    /// Set by import, or once by the first successful `geometrics()` call
    mdlog: Option<String>,
    zonelog: Option<String>,
}

impl Well {
    pub fn new(name: impl Into<String>, table: LogTable) -> Self {
        Self {
            name: name.into(),
            xpos: None,
            ypos: None,
            rkb: None,
            table,
            mdlog: None,
            zonelog: None,
        }
    }

    /// Build a well from importer output.
    pub fn from_import(import: WellImport) -> Result<Self, WellError> {
        import.table.validate()?;
        let mut well = Self {
            name: import.name,
            xpos: import.xpos,
            ypos: import.ypos,
            rkb: import.rkb,
            table: import.table,
            mdlog: None,
            zonelog: None,
        };

        if let Some(md) = import.mdlog {
            if well.table.contains(&md) {
                well.mdlog = Some(md);
            } else if import.strict {
                return Err(WellError::UnknownLog(md));
            } else {
                warn!(well = %well.name, mdlog = %md, "Requested mdlog not present, ignoring");
            }
        }

        if let Some(zl) = import.zonelog {
            match well.set_zonelog(&zl) {
                Ok(()) => {}
                Err(e) if import.strict => return Err(e),
                Err(e) => {
                    warn!(well = %well.name, zonelog = %zl, error = %e, "Requested zonelog not usable, ignoring");
                }
            }
        }

        debug!(well = %well.name, rows = well.table.nrow(), logs = well.table.nlogs(), "Imported well");
        Ok(well)
    }

    /// Shape handed to exporters.
    pub fn to_import(&self) -> WellImport {
        WellImport {
            name: self.name.clone(),
            xpos: self.xpos,
            ypos: self.ypos,
            rkb: self.rkb,
            table: self.table.clone(),
            mdlog: self.mdlog.clone(),
            zonelog: self.zonelog.clone(),
            strict: true,
        }
    }

    pub fn with_wellhead(mut self, xpos: f64, ypos: f64) -> Self {
        self.xpos = Some(xpos);
        self.ypos = Some(ypos);
        self
    }

    pub fn with_rkb(mut self, rkb: f64) -> Self {
        self.rkb = Some(rkb);
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn xpos(&self) -> Option<f64> {
        self.xpos
    }

    pub fn ypos(&self) -> Option<f64> {
        self.ypos
    }

    pub fn rkb(&self) -> Option<f64> {
        self.rkb
    }

    pub fn table(&self) -> &LogTable {
        &self.table
    }

    pub fn mdlog(&self) -> Option<&str> {
        self.mdlog.as_deref()
    }

    pub fn zonelog(&self) -> Option<&str> {
        self.zonelog.as_deref()
    }

    /// Designate the zonation log. The column must exist and be discrete.
    pub fn set_zonelog(&mut self, name: &str) -> Result<(), WellError> {
        match self.table.log_type(name) {
            None => Err(WellError::UnknownLog(name.to_string())),
            Some(LogType::Continuous) => Err(WellError::NotDiscrete(name.to_string())),
            Some(LogType::Discrete) => {
                self.zonelog = Some(name.to_string());
                Ok(())
            }
        }
    }

    pub fn clear_zonelog(&mut self) {
        self.zonelog = None;
    }

    // ------------------------------------------------------------------------
    // Log edits
    // ------------------------------------------------------------------------

    /// Append a new log to the table.
    pub fn add_log(&mut self, name: &str, log_type: LogType, values: Vec<f64>) -> Result<(), WellError> {
        self.table.add_log(name, log_type, values)
    }

    /// Insert or replace a log. Retyping the zonelog to continuous drops
    /// the zonelog designation.
    pub fn set_log(&mut self, name: &str, log_type: LogType, values: Vec<f64>) -> Result<(), WellError> {
        self.table.set_log(name, log_type, values)?;
        self.sync_designations();
        Ok(())
    }

    /// Remove a log. A designated mdlog or zonelog is released with it.
    pub fn remove_log(&mut self, name: &str) -> Result<Vec<f64>, WellError> {
        let values = self.table.remove_log(name)?;
        self.sync_designations();
        Ok(values)
    }

    /// Replace the code record of a discrete log.
    pub fn set_record(&mut self, name: &str, record: CodeRecord) -> Result<(), WellError> {
        self.table.set_record(name, record)
    }

    /// Drop designations whose column is gone or no longer qualifies.
    fn sync_designations(&mut self) {
        if let Some(md) = self.mdlog.take() {
            if self.table.contains(&md) {
                self.mdlog = Some(md);
            } else {
                debug!(well = %self.name, mdlog = %md, "Designated mdlog removed");
            }
        }
        if let Some(zl) = self.zonelog.take() {
            if self.table.log_type(&zl) == Some(LogType::Discrete) {
                self.zonelog = Some(zl);
            } else {
                debug!(well = %self.name, zonelog = %zl, "Designated zonelog no longer usable");
            }
        }
    }

    // ------------------------------------------------------------------------
    // Name forms
    // ------------------------------------------------------------------------

    /// File-safe name: `/` and spaces replaced with `_`
    pub fn xwellname(&self) -> String {
        self.name.replace(['/', ' '], "_")
    }

    /// Name with block name and spaces removed, e.g.
    /// `31/2-G-5 AH` -> `G-5AH`, `6472_11-F-23_AH_T2` -> `F-23AHT2`
    pub fn shortwellname(&self) -> String {
        let mut short = String::new();
        let mut past_block = false;
        let mut past_dash = false;
        for ch in self.name.chars() {
            if past_block && past_dash {
                short.push(ch);
                continue;
            }
            if ch == '_' || ch == '/' {
                past_block = true;
                continue;
            }
            if past_block && ch == '-' {
                past_dash = true;
            }
        }
        short.retain(|c| c != '_' && c != ' ');
        short
    }

    /// Name on the assumed form `31/2-E-4 AH2`
    pub fn truewellname(&self) -> String {
        let mut name = self.xwellname();
        if !name.contains('/') {
            name = name.replacen('_', "/", 1).replace('_', " ");
        }
        name
    }

    // ------------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------------

    /// Add quasi measured depth (`Q_MDEPTH`) and inclination (`Q_INCL`) logs.
    ///
    /// If no measured-depth log is designated yet, `Q_MDEPTH` becomes the
    /// designated one. A provider failure aborts the call and leaves the
    /// table untouched.
    pub fn geometrics<G: GeometryProvider + ?Sized>(&mut self, provider: &G) -> Result<(), WellError> {
        let n = self.table.nrow();
        let result = TrajectoryBuffers::acquire(&self.table)
            .compute(|x, y, z| provider.measured_depth_and_inclination(x, y, z))?;
        check_output_len(n, &result.md)?;
        check_output_len(n, &result.incl)?;

        self.table.set_log(Q_MDEPTH, LogType::Continuous, result.md)?;
        self.table.set_log(Q_INCL, LogType::Continuous, result.incl)?;

        if self.mdlog.is_none() {
            info!(well = %self.name, "No measured depth log, using {}", Q_MDEPTH);
            self.mdlog = Some(Q_MDEPTH.to_string());
        }
        Ok(())
    }

    /// Add the horizontal length log `R_HLEN`, relative to the first sample.
    pub fn create_relative_hlen<G: GeometryProvider + ?Sized>(
        &mut self,
        provider: &G,
    ) -> Result<(), WellError> {
        let n = self.table.nrow();
        let hlen = TrajectoryBuffers::acquire(&self.table)
            .compute(|x, y, z| provider.horizontal_length(x, y, z))?;
        check_output_len(n, &hlen)?;
        self.table.set_log(R_HLEN, LogType::Continuous, hlen)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{GeometryError, MdIncl, PolylineGeometry};

    fn table() -> LogTable {
        let mut t = LogTable::new(
            vec![0.0, 0.0, 3.0],
            vec![0.0, 0.0, 4.0],
            vec![1000.0, 1010.0, 1010.0],
        )
        .unwrap();
        t.add_log("ZONELOG", LogType::Discrete, vec![1.0, 2.0, 2.0]).unwrap();
        t.add_log("GR", LogType::Continuous, vec![1.0, 2.0, 3.0]).unwrap();
        t
    }

    struct FailingProvider;

    impl GeometryProvider for FailingProvider {
        fn measured_depth_and_inclination(
            &self,
            _x: &[f64],
            _y: &[f64],
            _z: &[f64],
        ) -> Result<MdIncl, GeometryError> {
            Err(GeometryError::Backend(-9))
        }

        fn horizontal_length(&self, _x: &[f64], _y: &[f64], _z: &[f64]) -> Result<Vec<f64>, GeometryError> {
            Ok(vec![0.0])
        }
    }

    #[test]
    fn test_name_forms() {
        let w = Well::new("31/2-G-5 AH", table());
        assert_eq!(w.xwellname(), "31_2-G-5_AH");
        assert_eq!(w.shortwellname(), "G-5AH");
        assert_eq!(w.truewellname(), "31/2-G-5 AH");

        let w = Well::new("6472_11-F-23_AH_T2", table());
        assert_eq!(w.shortwellname(), "F-23AHT2");

        let w = Well::new("31_2-E-4_AH2", table());
        assert_eq!(w.truewellname(), "31/2-E-4 AH2");
    }

    #[test]
    fn test_set_zonelog_requires_discrete() {
        let mut w = Well::new("W1", table());
        assert!(matches!(w.set_zonelog("GR"), Err(WellError::NotDiscrete(_))));
        assert!(matches!(w.set_zonelog("NOPE"), Err(WellError::UnknownLog(_))));
        w.set_zonelog("ZONELOG").unwrap();
        assert_eq!(w.zonelog(), Some("ZONELOG"));
    }

    #[test]
    fn test_geometrics_designates_quasi_md_once() {
        let mut w = Well::new("W1", table());
        assert!(w.mdlog().is_none());
        w.geometrics(&PolylineGeometry::new()).unwrap();
        assert_eq!(w.mdlog(), Some(Q_MDEPTH));
        assert_eq!(w.table().get(Q_MDEPTH).unwrap(), &[0.0, 10.0, 15.0]);
        assert!((w.table().get(Q_INCL).unwrap()[2] - 90.0).abs() < 1e-9);

        // a second run replaces the logs in place
        w.geometrics(&PolylineGeometry::new()).unwrap();
        assert_eq!(w.table().log_names(false), vec!["ZONELOG", "GR", Q_MDEPTH, Q_INCL]);
    }

    #[test]
    fn test_geometrics_keeps_imported_md() {
        let mut t = table();
        t.add_log("MD", LogType::Continuous, vec![0.0, 11.0, 16.0]).unwrap();
        let mut w = Well::from_import(WellImport {
            name: "W1".into(),
            xpos: None,
            ypos: None,
            rkb: None,
            table: t,
            mdlog: Some("MD".into()),
            zonelog: None,
            strict: true,
        })
        .unwrap();
        w.geometrics(&PolylineGeometry::new()).unwrap();
        assert_eq!(w.mdlog(), Some("MD"));
    }

    #[test]
    fn test_geometrics_failure_is_fatal_and_leaves_table() {
        let mut w = Well::new("W1", table());
        let err = w.geometrics(&FailingProvider).unwrap_err();
        assert!(matches!(err, WellError::Geometry(GeometryError::Backend(-9))));
        assert!(w.mdlog().is_none());
        assert!(w.table().get(Q_MDEPTH).is_none());
    }

    #[test]
    fn test_short_provider_output_rejected() {
        let mut w = Well::new("W1", table());
        let err = w.create_relative_hlen(&FailingProvider).unwrap_err();
        assert!(matches!(err, WellError::Geometry(GeometryError::OutputLength { .. })));
    }

    #[test]
    fn test_removed_designations_are_released() {
        let mut t = table();
        t.add_log("MD", LogType::Continuous, vec![0.0, 11.0, 16.0]).unwrap();
        let mut w = Well::from_import(WellImport {
            name: "W1".into(),
            xpos: None,
            ypos: None,
            rkb: None,
            table: t,
            mdlog: Some("MD".into()),
            zonelog: Some("ZONELOG".into()),
            strict: true,
        })
        .unwrap();

        w.remove_log("MD").unwrap();
        w.remove_log("ZONELOG").unwrap();
        assert!(w.mdlog().is_none());
        assert!(w.zonelog().is_none());

        // quasi md takes over once the imported one is gone
        w.geometrics(&PolylineGeometry::new()).unwrap();
        assert_eq!(w.mdlog(), Some(Q_MDEPTH));
    }

    #[test]
    fn test_retyped_zonelog_is_released() {
        let mut w = Well::new("W1", table());
        w.set_zonelog("ZONELOG").unwrap();
        w.set_log("ZONELOG", LogType::Discrete, vec![3.0, 3.0, 4.0]).unwrap();
        assert_eq!(w.zonelog(), Some("ZONELOG"));

        w.set_log("ZONELOG", LogType::Continuous, vec![0.1, 0.2, 0.3]).unwrap();
        assert!(w.zonelog().is_none());
    }

    #[test]
    fn test_relative_hlen() {
        let mut w = Well::new("W1", table());
        w.create_relative_hlen(&PolylineGeometry::new()).unwrap();
        assert_eq!(w.table().get(R_HLEN).unwrap(), &[0.0, 0.0, 5.0]);
    }

    #[test]
    fn test_import_strict_and_lenient() {
        let import = WellImport {
            name: "W1".into(),
            xpos: Some(1.0),
            ypos: Some(2.0),
            rkb: Some(25.0),
            table: table(),
            mdlog: Some("MISSING_MD".into()),
            zonelog: Some("ZONELOG".into()),
            strict: true,
        };
        assert!(matches!(
            Well::from_import(import.clone()),
            Err(WellError::UnknownLog(_))
        ));

        let w = Well::from_import(WellImport {
            strict: false,
            ..import
        })
        .unwrap();
        assert!(w.mdlog().is_none());
        assert_eq!(w.zonelog(), Some("ZONELOG"));
        assert_eq!(w.rkb(), Some(25.0));
        assert_eq!(w.to_import().zonelog.as_deref(), Some("ZONELOG"));
    }
}

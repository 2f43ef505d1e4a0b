use std::io::{self, Write};

use crate::check::{plural_s, CheckResult};

/// Console report writer.
#[derive(Debug)]
pub struct Reporter<W> {
    out: W,
}

impl<W> Reporter<W>
where
    W: Write,
{
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn retrieving(&mut self) -> io::Result<()> {
        writeln!(self.out, "Retrieving feature infos ...")
    }

    /// List the supported feature names, sorted.
    pub fn feature_names(&mut self, feature_names: &[String]) -> io::Result<()> {
        writeln!(
            self.out,
            "{} {} found in feature-calculation info:",
            feature_names.len(),
            plural_s("feature", feature_names)
        )?;
        self.sorted(feature_names)
    }

    pub fn ok(&mut self) -> io::Result<()> {
        writeln!(self.out, "OK")
    }

    /// `FAILED`, then a block for every non-compliant model.
    pub fn failed(&mut self, results: &[CheckResult]) -> io::Result<()> {
        writeln!(self.out, "FAILED")?;
        for result in results.iter().filter(|r| !r.is_compliant()) {
            writeln!(
                self.out,
                "{} unsupported {} found in model {}:",
                result.unsupported_features.len(),
                plural_s("feature", &result.unsupported_features),
                result.model_path
            )?;
            self.sorted(&result.unsupported_features)?;
        }
        Ok(())
    }

    fn sorted(&mut self, names: &[String]) -> io::Result<()> {
        let mut names = names.iter().collect::<Vec<_>>();
        names.sort();
        for name in names {
            writeln!(self.out, "\t{}", name)?;
        }
        Ok(())
    }
}

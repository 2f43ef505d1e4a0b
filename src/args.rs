use std::path::Path;

/// Flag enabling the supported feature listing.
pub const VERBOSE_FLAG: &str = "-v";

/// Command line arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// `host:port` of the feature-calculation service.
    pub fc_host: String,
    /// `host:port` of the value-calculation service.
    pub vc_host: String,
    pub verbose: bool,
}

impl Args {
    /// Parse `argv`, program name included.
    ///
    /// `None` when either host is missing. Arguments after the optional
    /// verbose flag are ignored.
    pub fn parse_from<I, S>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = args.into_iter().map(Into::into).collect::<Vec<String>>();
        match &*args {
            [_, fc_host, vc_host, rest @ ..] => Some(Self {
                fc_host: fc_host.clone(),
                vc_host: vc_host.clone(),
                verbose: rest.first().map(String::as_str) == Some(VERBOSE_FLAG),
            }),
            _ => None,
        }
    }
}

/// Usage text for `program`.
pub fn usage(program: &str) -> String {
    let name = Path::new(program)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
    format!(
        "usage: {name} feature-calculation-host-and-port value-calculation-host-and-port [{flag}]\n\
         e.g. {name} prod-feature-calculation:8081 prod-value-calculation:8081",
        name = name,
        flag = VERBOSE_FLAG,
    )
}

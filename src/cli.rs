use crate::config::{IdStrategy, SeedSource, StoreConfig};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLineConfig {
    pub store: StoreConfig,
    pub save: Option<String>,
    pub command: String,
    pub command_args: Vec<String>,
    /// Set by `-h`/`--help` ahead of the command; after it they are command args.
    pub help: bool,
}

impl CommandLineConfig {
    pub fn from_args(args: &[&str]) -> Result<Self, String> {
        let mut store = StoreConfig::default();
        let mut save = None;
        let mut command = String::from("status");
        let mut command_args = Vec::new();
        let mut command_set = false;
        let mut help = false;
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            if command_set {
                command_args.push(arg.to_string());
                continue;
            }
            match *arg {
                "-h" | "--help" => help = true,
                "--seed" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| "--seed requires a value".to_string())?;
                    store.seed = value.parse::<SeedSource>().map_err(|e| e.to_string())?;
                }
                "--ids" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| "--ids requires a value".to_string())?;
                    store.ids = value.parse::<IdStrategy>().map_err(|e| e.to_string())?;
                }
                "--save" => {
                    save = Some(
                        iter.next()
                            .ok_or_else(|| "--save requires a value".to_string())?
                            .to_string(),
                    );
                }
                "--command" => {
                    command = iter
                        .next()
                        .ok_or_else(|| "--command requires a value".to_string())?
                        .to_string();
                    command_set = true;
                }
                other if other.starts_with('-') => {
                    return Err(format!("unknown flag {other}"));
                }
                _ => {
                    command = arg.to_string();
                    command_set = true;
                }
            }
        }
        Ok(Self {
            store,
            save,
            command,
            command_args,
            help,
        })
    }

    pub fn help() -> &'static str {
        concat!(
            "Usage: postgraph [--seed demo|empty|PATH] [--ids random|sequential] [--save PATH] <command> [args]\n",
            "Commands:\n",
            "  status                        record counts\n",
            "  users|posts|comments [QUERY]  filtered listing as JSON\n",
            "  check                         integrity report, exit 1 on issues\n",
            "  run                           execute JSON operations from stdin, one per line\n",
        )
    }
}

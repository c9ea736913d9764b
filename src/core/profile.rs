use crate::domain::model::{ProfileInputs, TerminalProfile};

pub const REPL_TERMINAL_NAME: &str = "Legend REPL (test)";
pub const JAVA_EXECUTABLE: &str = "java";
pub const REPL_ICON: &str = "repl";
pub const PORT_PLACEHOLDER: &str = "{{port}}";

const DEV_WEB_APP_BASE_URL_PROPERTY: &str = "legend.repl.dataCube.devWebAppBaseUrl";
const DEV_PORT_PROPERTY: &str = "legend.repl.dataCube.devPort";
const GRID_LICENSE_KEY_PROPERTY: &str = "legend.repl.dataCube.gridLicenseKey";

pub fn build_terminal_profile(inputs: &ProfileInputs) -> TerminalProfile {
    TerminalProfile {
        name: REPL_TERMINAL_NAME.to_string(),
        shell_path: JAVA_EXECUTABLE.to_string(),
        shell_args: build_shell_args(inputs),
        message: build_intro_message(inputs),
        icon: REPL_ICON.to_string(),
    }
}

/// 沒設定的選項整個省略，不傳空值
pub fn build_shell_args(inputs: &ProfileInputs) -> Vec<String> {
    let mut args = Vec::new();

    if let Some(proxy_uri) = non_empty(inputs.proxy_uri.as_deref()) {
        let base_url = proxy_uri.replace(PORT_PLACEHOLDER, &inputs.port.to_string());
        args.push(system_property(DEV_WEB_APP_BASE_URL_PROPERTY, &base_url));
    }

    args.push(system_property(DEV_PORT_PROPERTY, &inputs.port.to_string()));

    if let Some(license) = non_empty(inputs.grid_license.as_deref()) {
        args.push(system_property(GRID_LICENSE_KEY_PROPERTY, license));
    }

    args.push("-jar".to_string());
    args.push(inputs.archive_path.display().to_string());
    args
}

pub fn build_intro_message(inputs: &ProfileInputs) -> String {
    format!(
        "Starting {name}...\r\n\r\n\
         Type 'help' or hit 'Enter' to see the full list of commands and their usage.\r\n\
         Check out Data Cube by using the included example data:\r\n\x1b[1;32m\r\n\
         > load {data} local::DuckDuckConnection sport\r\n\
         > #>{{local::DuckDuckDatabase.sport}}#->sort([])->from(local::DuckDuckRuntime)\r\n\
         > show\r\n\x1b[0m\r\n",
        name = REPL_TERMINAL_NAME,
        data = inputs.example_data_path.display(),
    )
}

fn system_property(key: &str, value: &str) -> String {
    format!("-D{}={}", key, value)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

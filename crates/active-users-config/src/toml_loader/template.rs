//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Active Users widget configuration
# Only override what you want to change -- missing fields use defaults.
# Whether the widget is enabled, how often it refreshes, and whether
# manual refresh is allowed are controlled by the server.

[endpoint]
# base_url = "http://localhost:8000"
# method_prefix = "active_users.utils.api"
# api_key = ""
# api_secret = ""
# timeout_secs = 15      # 1-300

[display]
# title = "Active Users"
# footer_label = "Total"

[logging]
# level = "info"         # trace, debug, info, warn, error
"##
    .to_string()
}

//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Pairline Configuration
# Only override what you want to change -- missing fields use defaults.

[server]
# host = "127.0.0.1"
# port = 3000            # 1024-65535

[logging]
# level = "INFO"         # DEBUG | INFO | WARNING | ERROR
# RUST_LOG takes precedence when set.
"##
}

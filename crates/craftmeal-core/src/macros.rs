#[macro_export]
macro_rules! get_craftmeal_setting {
    ($setting:ident) => {
        ::std::env::var(stringify!($setting))
            .unwrap_or($crate::config::$setting.to_string())
    };
    ($setting:ident, usize) => {
        match ::std::env::var(stringify!($setting)) {
            Ok(v) => match v.parse() {
                Ok(i) => i,
                Err(_e) => {
                    ::log::warn!(
                        "Env var setting {}, is not a valid unsigned integer. Using default",
                        stringify!($setting)
                    );
                    $crate::config::$setting
                }
            },
            Err(_e) => $crate::config::$setting,
        }
    };
}

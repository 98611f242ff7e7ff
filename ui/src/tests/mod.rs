mod i18n_completeness;
mod theme_coverage;

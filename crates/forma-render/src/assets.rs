//! Theme asset payloads and pinned CDN references.
//!
//! The vendored payloads cover exactly the classes the renderer emits, so
//! a vendored fragment is self-contained without shipping the full
//! upstream framework distribution.

pub(crate) const BOOTSTRAP_CDN_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
pub(crate) const BOOTSTRAP_CDN_JS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js";
pub(crate) const BOOTSTRAP_ICONS_CDN_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap-icons@1.11.3/font/bootstrap-icons.min.css";

pub(crate) const MATERIAL_CDN_CSS: &str =
    "https://unpkg.com/material-components-web@14.0.0/dist/material-components-web.min.css";
pub(crate) const MATERIAL_CDN_JS: &str =
    "https://unpkg.com/material-components-web@14.0.0/dist/material-components-web.min.js";
pub(crate) const MATERIAL_ICONS_CDN_CSS: &str =
    "https://fonts.googleapis.com/icon?family=Material+Icons";

pub(crate) const BOOTSTRAP_VENDORED_CSS: &str = r#"
.sf-form{font-family:system-ui,-apple-system,"Segoe UI",Roboto,sans-serif;color:#212529}
.mb-3{margin-bottom:1rem}
.form-label{display:inline-block;margin-bottom:.5rem;font-weight:500}
.form-control{display:block;width:100%;padding:.375rem .75rem;font-size:1rem;line-height:1.5;color:#212529;background-color:#fff;border:1px solid #ced4da;border-radius:.375rem}
.form-control:focus{border-color:#86b7fe;outline:0;box-shadow:0 0 0 .25rem rgba(13,110,253,.25)}
.form-select{display:block;width:100%;padding:.375rem 2.25rem .375rem .75rem;font-size:1rem;border:1px solid #ced4da;border-radius:.375rem;background-color:#fff}
.form-check{display:block;min-height:1.5rem;padding-left:1.5em;margin-bottom:.125rem}
.form-check-input{float:left;margin-left:-1.5em;width:1em;height:1em;margin-top:.25em;border:1px solid rgba(0,0,0,.25)}
.form-check-label{margin-left:.25rem}
.form-range{width:100%;height:1.5rem;padding:0;background-color:transparent;appearance:none}
.form-text{margin-top:.25rem;font-size:.875em;color:#6c757d}
.is-invalid{border-color:#dc3545}
.invalid-feedback{display:block;width:100%;margin-top:.25rem;font-size:.875em;color:#dc3545}
.btn{display:inline-block;padding:.375rem .75rem;font-size:1rem;border-radius:.375rem;border:1px solid transparent;cursor:pointer}
.btn-primary{color:#fff;background-color:#0d6efd;border-color:#0d6efd}
.btn-outline-secondary{color:#6c757d;border-color:#6c757d;background:transparent}
.btn-sm{padding:.25rem .5rem;font-size:.875rem;border-radius:.25rem}
.card{border:1px solid rgba(0,0,0,.175);border-radius:.375rem;background:#fff}
.card-body{padding:1rem}
.card-title{margin-bottom:.5rem;font-size:1.25rem}
.mb-4{margin-bottom:1.5rem}
.sf-list-item{border:1px solid rgba(0,0,0,.1);border-radius:.375rem;padding:.75rem;margin-bottom:.75rem}
"#;

pub(crate) const BOOTSTRAP_VENDORED_JS: &str = r#"
document.addEventListener("submit",function(e){
  var form=e.target.closest(".sf-form");
  if(form){form.classList.add("was-validated");}
});
"#;

pub(crate) const MATERIAL_VENDORED_CSS: &str = r#"
.sf-form{font-family:Roboto,system-ui,sans-serif;color:#1c1b1f}
.md-field{margin-bottom:1.25rem;position:relative}
.md-label{display:block;font-size:.75rem;letter-spacing:.03em;color:#49454f;margin-bottom:.25rem}
.md-input{display:block;width:100%;padding:.75rem .75rem .5rem;font-size:1rem;border:none;border-bottom:2px solid #79747e;border-radius:.25rem .25rem 0 0;background-color:#f5f1f8}
.md-input:focus{outline:none;border-bottom-color:#6750a4}
.md-select{display:block;width:100%;padding:.75rem;font-size:1rem;border:1px solid #79747e;border-radius:.25rem;background:#fff}
.md-check{display:flex;align-items:center;gap:.5rem;margin-bottom:.25rem}
.md-check-input{width:1.125rem;height:1.125rem;accent-color:#6750a4}
.md-error{margin-top:.25rem;font-size:.75rem;color:#b3261e}
.md-invalid{border-bottom-color:#b3261e}
.md-help{margin-top:.25rem;font-size:.75rem;color:#49454f}
.md-button{display:inline-block;padding:.625rem 1.5rem;font-size:.875rem;font-weight:500;color:#fff;background-color:#6750a4;border:none;border-radius:1.25rem;cursor:pointer}
.md-button-outlined{color:#6750a4;background:transparent;border:1px solid #79747e}
.md-section{border:1px solid #cac4d0;border-radius:.75rem;padding:1rem;margin-bottom:1.5rem;background:#fff}
.md-section-title{margin:0 0 .75rem;font-size:1.125rem;font-weight:500}
.sf-list-item{border:1px solid #cac4d0;border-radius:.75rem;padding:.75rem;margin-bottom:.75rem}
"#;

pub(crate) const MATERIAL_VENDORED_JS: &str = r#"
document.addEventListener("focusin",function(e){
  var field=e.target.closest(".md-field");
  if(field){field.classList.add("md-focused");}
});
document.addEventListener("focusout",function(e){
  var field=e.target.closest(".md-field");
  if(field){field.classList.remove("md-focused");}
});
"#;

use easel_primitives::SandboxPolicy;
use easel_worker::Generation;

const HOST_PAGE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>Playground</title>
<style>
html, body { margin: 0; height: 100%; }
#preview { display: block; width: 100%; height: 100vh; border: 0; }
</style>
</head>
<body>
<div id="preview-root">{frame}</div>
<script>
(() => {
  const root = document.getElementById('preview-root');
  let shown = {shown};
  const mount = (generation) => {
    if (!(generation > shown)) return;
    shown = generation;
    root.querySelectorAll('iframe').forEach((old) => old.remove());
    const frame = document.createElement('iframe');
    frame.id = 'preview';
    frame.title = 'Preview';
    frame.setAttribute('sandbox', '{sandbox}');
    frame.src = '/playground/frame/' + generation;
    root.appendChild(frame);
  };
  const events = new EventSource('/playground/events');
  events.addEventListener('generation', (e) => mount(Number(e.data)));
})();
</script>
</body>
</html>
"#;

pub(crate) fn frame_src(generation: Generation) -> String {
	format!("/playground/frame/{generation}")
}

/// Renders the host page.
///
/// The iframe is replaced, never navigated, on each new generation so no
/// script state from the previous document survives.
pub(crate) fn host_page(sandbox: SandboxPolicy, current: Option<Generation>) -> String {
	let sandbox = sandbox.attribute_value();
	let frame = match current {
		Some(generation) => format!(
			r#"<iframe id="preview" title="Preview" sandbox="{sandbox}" src="{}"></iframe>"#,
			frame_src(generation)
		),
		None => String::new(),
	};
	HOST_PAGE
		.replace("{frame}", &frame)
		.replace("{shown}", &current.map_or(0, Generation::get).to_string())
		.replace("{sandbox}", &sandbox)
}

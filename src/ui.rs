use crate::engagement::EngagementController;
use crate::prefs::Theme;
use crate::team::{TeamData, TeamMember};
use crate::week;
use chrono::{DateTime, Utc};
use std::fmt::Write;

const SECTION_LINKS: [(&str, &str); 10] = [
    ("checklist", "Weekly Checklist"),
    ("overview", "ICP Overview"),
    ("connect-engage", "Connect vs Engage"),
    ("starters", "Conversation Starters"),
    ("quotes", "Real Quotes"),
    ("content", "Content Pillars"),
    ("boosters", "Engagement Boosters"),
    ("red-flags", "Red Flags"),
    ("trust", "Trust Builders"),
    ("quick-ref", "Quick Reference"),
];

pub struct DashboardView<'a> {
    pub member: &'a TeamMember,
    pub controller: &'a EngagementController,
    /// Set when this open, or the toggle that redirected here, rolled the week over.
    pub new_week_notice: bool,
    pub theme: Theme,
    pub checklist_collapsed: bool,
    pub now: DateTime<Utc>,
}

pub fn render_landing(team: &TeamData, theme: Theme, resume: Option<&TeamMember>) -> String {
    let mut cards = String::new();
    for member in &team.team_members {
        let _ = write!(
            cards,
            r#"<form class="card member" method="post" action="/select">
  <input type="hidden" name="member_id" value="{id}" />
  <button type="submit">
    <span class="avatar">{avatar}</span>
    <span class="name">{name}</span>
    <span class="role">{role}</span>
    <span class="service">{service}</span>
    <span class="pills">{services}</span>
  </button>
</form>
"#,
            id = escape(&member.id),
            avatar = escape(&member.avatar),
            name = escape(&member.name),
            role = escape(&member.role),
            service = escape(&member.icp.primary_service),
            services = pills(&member.icp.services_focus),
        );
    }

    let resume_link = resume
        .map(|member| {
            format!(
                r#"<a class="resume" href="{}">Resume {}</a>"#,
                escape(&member_path(&member.id)),
                escape(&member.name)
            )
        })
        .unwrap_or_default();

    page(
        theme,
        "LinkedIn ICP Playbooks",
        &format!(
            r#"<header class="top">
  <div>
    <p class="eyebrow">Midwestern Interactive</p>
    <h1>LinkedIn ICP Playbooks</h1>
  </div>
  <div class="actions">{resume_link}{toggle}</div>
</header>
<main>
  <p class="lead">Select your profile to access your personalized dashboard.</p>
  <section class="grid">
{cards}  </section>
</main>"#,
            toggle = theme_toggle(theme, "/"),
        ),
    )
}

pub fn render_dashboard(view: &DashboardView<'_>) -> String {
    let member = view.member;
    let mut nav = String::new();
    for (id, label) in SECTION_LINKS {
        let _ = write!(nav, "<a href=\"#{id}\">{label}</a>");
    }

    let mut body = String::new();
    let _ = write!(
        body,
        r#"<header class="top">
  <a class="back" href="/">&larr; Back to team selection</a>
  {toggle}
</header>
<nav class="sections">{nav}</nav>
<main>
<section class="hero">
  <span class="avatar large">{avatar}</span>
  <div>
    <p class="eyebrow">{role}</p>
    <h1>{name}</h1>
    <p class="lead">{title}</p>
    <div class="pills">{roles}</div>
  </div>
</section>
"#,
        toggle = theme_toggle(view.theme, &escape(&member_path(&member.id))),
        avatar = escape(&member.avatar),
        role = escape(&member.role),
        name = escape(&member.name),
        title = escape(&member.icp.title),
        roles = pills(&member.icp.target_roles),
    );

    body.push_str(&checklist_section(view));
    body.push_str(&overview_section(member));
    body.push_str(&connect_engage_section(member));
    body.push_str(&starters_section(member));
    body.push_str(&list_section(
        "quotes",
        "What They're Actually Saying",
        &member.real_quotes,
        "quote",
    ));
    body.push_str(&pillars_section(member));
    body.push_str(&boosters_section(member));
    body.push_str(&list_section("red-flags", "Red Flags", &member.red_flags, "flag"));
    body.push_str(&list_section(
        "trust",
        "What They Need to See",
        &member.trust_builders,
        "trust",
    ));
    body.push_str(&quick_reference_section(member));
    body.push_str("</main>\n<div id=\"toast\" class=\"toast\" hidden></div>\n");

    page(view.theme, &member.name, &body)
}

pub fn render_not_found(theme: Theme) -> String {
    page(
        theme,
        "Not found",
        r#"<main class="not-found">
  <p class="lead">Team member not found.</p>
  <a class="back" href="/">&larr; Back to team selection</a>
</main>"#,
    )
}

fn checklist_section(view: &DashboardView<'_>) -> String {
    let controller = view.controller;
    let base = escape(&member_path(controller.user_id()));
    let progress = controller.progress();

    let mut out = String::new();
    let _ = write!(
        out,
        r#"<section id="checklist" class="card">
  <div class="section-head">
    <h2>Weekly Engagement Checklist</h2>
    <span class="progress">{completed}/{total} done</span>
    <form method="post" action="{base}/checklist/collapse">
      <button class="link" type="submit">{collapse_label}</button>
    </form>
  </div>
"#,
        completed = progress.completed,
        total = progress.total,
        collapse_label = if view.checklist_collapsed { "Show" } else { "Hide" },
    );

    // Dismissal is client-side only; the notice is never stored.
    if view.new_week_notice {
        out.push_str(
            r#"  <p class="notice" id="new-week">New week started! Your checklist has been reset.
    <button class="link" type="button" data-dismiss="new-week">Dismiss</button></p>
"#,
        );
    }

    if let Some(start) = controller.week_start() {
        let _ = write!(
            out,
            "  <p class=\"hint\">Week of {}. Resets in {} day(s).</p>\n",
            start.format("%Y-%m-%d"),
            week::days_remaining(start, view.now),
        );
    }

    if !view.checklist_collapsed {
        out.push_str("  <ul class=\"tasks\">\n");
        for task in controller.tasks() {
            let done = controller.is_done(&task.id);
            let _ = write!(
                out,
                r#"    <li class="{class}">
      <form method="post" action="{base}/tasks/{task_id}">
        <input type="hidden" name="done" value="{next}" />
        <button class="check" type="submit" aria-pressed="{done}">{mark}</button>
        <span>{label}</span>
      </form>
    </li>
"#,
                class = if done { "task done" } else { "task" },
                task_id = escape(&urlencoding::encode(&task.id)),
                next = !done,
                mark = if done { "&#10003;" } else { "&nbsp;" },
                label = escape(&task.label),
            );
        }
        out.push_str("  </ul>\n");
    }

    if progress.all_complete {
        out.push_str("  <p class=\"celebrate\">All done for this week. Great work!</p>\n");
    }
    out.push_str("</section>\n");
    out
}

fn overview_section(member: &TeamMember) -> String {
    let icp = &member.icp;
    let mut topics = String::new();
    for topic in &icp.hot_topics {
        let _ = write!(topics, "<li>{}</li>", escape(topic));
    }
    format!(
        r#"<section id="overview" class="card">
  <h2>Your ICP Overview</h2>
  <div class="columns">
    <div><p class="eyebrow">Who you're targeting</p><p class="strong">{title}</p><div class="pills">{roles}</div></div>
    <div><p class="eyebrow">Company profile</p><p>{profile}</p><div class="pills">{industries}</div></div>
    <div><p class="eyebrow">They're posting about</p><ul>{topics}</ul></div>
  </div>
</section>
"#,
        title = escape(&icp.title),
        roles = pills(&icp.target_roles),
        profile = escape(&icp.company_profile),
        industries = pills(&icp.industries),
    )
}

fn connect_engage_section(member: &TeamMember) -> String {
    format!(
        r#"<section id="connect-engage" class="card">
  <h2>Connect vs Engage</h2>
  <p class="hint">Use this decision tree when scanning LinkedIn feeds.</p>
  <div class="columns two">
    <div class="connect"><h3>CONNECT if they...</h3><ul>{connect}</ul></div>
    <div class="engage"><h3>ENGAGE if they...</h3><ul>{engage}</ul></div>
  </div>
  <details><summary>Why this matters</summary>
    <p>Connecting is reserved for ICPs showing active buying signals. Engage when the intent is weaker; your goal is to nurture until they match the connect criteria.</p>
  </details>
</section>
"#,
        connect = list_items(&member.connect_criteria),
        engage = list_items(&member.engage_criteria),
    )
}

fn starters_section(member: &TeamMember) -> String {
    let mut cards = String::new();
    for starter in &member.conversation_starters {
        let _ = write!(
            cards,
            r#"<div class="card starter">
  <button class="copy" type="button" data-copy="{template}">Copy</button>
  <p>{template}</p>
  <p class="eyebrow">When to use</p>
  <p>{when}</p>
  <span class="pill">{tone}</span>
</div>
"#,
            template = escape(&starter.template),
            when = escape(&starter.when_to_use),
            tone = escape(&starter.tone),
        );
    }
    format!(
        r#"<section id="starters" class="card">
  <h2>Conversation Starters</h2>
  <div class="columns">
{cards}  </div>
</section>
"#
    )
}

fn pillars_section(member: &TeamMember) -> String {
    let mut items = String::new();
    for pillar in &member.content_pillars {
        let _ = write!(
            items,
            r#"<details class="pillar">
  <summary><span>{title}</span><span class="pill lime">{frequency}</span></summary>
  <p>{description}</p>
  <ul>{examples}</ul>
  <p class="tip">Posting tip <span>{tips}</span></p>
</details>
"#,
            title = escape(&pillar.title),
            frequency = escape(&pillar.frequency),
            description = escape(&pillar.description),
            examples = list_items(&pillar.examples),
            tips = escape(&pillar.posting_tips),
        );
    }
    format!(
        r#"<section id="content" class="card">
  <h2>Content You Should Post</h2>
{items}</section>
"#
    )
}

fn boosters_section(member: &TeamMember) -> String {
    let mut steps = String::new();
    for booster in &member.engagement_boosters {
        let _ = write!(
            steps,
            "<li><span class=\"step\">{}</span><div><strong>{}</strong><p>{}</p></div></li>",
            booster.step,
            escape(&booster.action),
            escape(&booster.why),
        );
    }
    format!(
        r#"<section id="boosters" class="card">
  <h2>{count} Engagement Boosters</h2>
  <ol class="boosters">{steps}</ol>
</section>
"#,
        count = member.engagement_boosters.len()
    )
}

fn quick_reference_section(member: &TeamMember) -> String {
    let Some(reference) = &member.quick_reference else {
        return String::new();
    };
    format!(
        r#"<section id="quick-ref" class="card">
  <h2>Quick Reference</h2>
  <table>
    <tr><th>Decision speed</th><td>{speed}</td></tr>
    <tr><th>Buying committee</th><td>{committee}</td></tr>
    <tr><th>When they're warm</th><td><ul>{warm}</ul></td></tr>
  </table>
</section>
"#,
        speed = escape(&reference.decision_speed),
        committee = escape(&reference.buying_committee),
        warm = list_items(&reference.when_warm),
    )
}

fn list_section(id: &str, title: &str, items: &[String], class: &str) -> String {
    if items.is_empty() {
        return String::new();
    }
    let mut out = format!(
        r#"<section id="{id}" class="card">
  <h2>{title}</h2>
  <div class="columns two">"#
    );
    for item in items {
        let _ = write!(out, "<div class=\"{class}\">{}</div>", escape(item));
    }
    out.push_str("</div>\n</section>\n");
    out
}

/// Dashboard URL for a member; ids from a custom dataset may need escaping.
pub fn member_path(id: &str) -> String {
    format!("/member/{}", urlencoding::encode(id))
}

fn list_items(items: &[String]) -> String {
    items.iter().map(|item| format!("<li>{}</li>", escape(item))).collect()
}

fn pills(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("<span class=\"pill\">{}</span>", escape(item)))
        .collect()
}

fn theme_toggle(theme: Theme, next: &str) -> String {
    let label = match theme {
        Theme::Dark => "Dark",
        Theme::Light => "Light",
    };
    format!(
        r#"<form method="post" action="/theme">
  <input type="hidden" name="next" value="{next}" />
  <button class="toggle" type="submit">{label}</button>
</form>"#
    )
}

fn page(theme: Theme, title: &str, body: &str) -> String {
    PAGE_HTML
        .replace("{{THEME}}", theme.as_str())
        .replace("{{TITLE}}", &escape(title))
        .replace("{{BODY}}", body)
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en" data-theme="{{THEME}}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root, [data-theme="dark"] {
      --bg-1: #0b0d17;
      --bg-2: #151827;
      --ink: #f4f5fb;
      --muted: #a1a6c0;
      --border: rgba(255, 255, 255, 0.1);
      --accent: #2337f1;
      --lime: #c7fa50;
    }

    [data-theme="light"] {
      --bg-1: #f7f7fb;
      --bg-2: #ffffff;
      --ink: #14162a;
      --muted: #5b5f78;
      --border: rgba(20, 22, 42, 0.12);
      --accent: #2337f1;
      --lime: #5a8a00;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg-1);
      color: var(--ink);
      font-family: "Inter", "Helvetica Neue", sans-serif;
    }

    main {
      max-width: 1200px;
      margin: 0 auto;
      padding: 48px 24px 96px;
      display: grid;
      gap: 40px;
    }

    .top {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 20px 24px;
      border-bottom: 1px solid var(--border);
    }

    .actions, .section-head {
      display: flex;
      gap: 12px;
      align-items: center;
    }

    .sections {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
      padding: 12px 24px;
      border-bottom: 1px solid var(--border);
    }

    .sections a, .pill {
      border: 1px solid var(--border);
      border-radius: 999px;
      padding: 4px 12px;
      font-size: 0.8rem;
      color: var(--muted);
      text-decoration: none;
    }

    .pill.lime {
      color: var(--lime);
    }

    .eyebrow {
      text-transform: uppercase;
      letter-spacing: 0.2em;
      font-size: 0.75rem;
      color: var(--muted);
    }

    .lead, .hint {
      color: var(--muted);
    }

    .grid, .columns {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
      gap: 24px;
    }

    .columns.two {
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
    }

    .card {
      background: var(--bg-2);
      border: 1px solid var(--border);
      border-radius: 20px;
      padding: 28px;
    }

    .member button {
      all: unset;
      cursor: pointer;
      display: grid;
      justify-items: center;
      gap: 10px;
      width: 100%;
      text-align: center;
    }

    .avatar {
      display: grid;
      place-items: center;
      width: 80px;
      height: 80px;
      border-radius: 50%;
      background: linear-gradient(135deg, var(--accent), #7b5cff);
      color: white;
      font-weight: 600;
      font-size: 1.5rem;
    }

    .avatar.large {
      width: 120px;
      height: 120px;
    }

    .hero {
      display: flex;
      gap: 24px;
      align-items: center;
    }

    button {
      font: inherit;
      cursor: pointer;
    }

    .toggle, .resume, .copy {
      border: 1px solid var(--border);
      border-radius: 999px;
      padding: 8px 14px;
      background: transparent;
      color: var(--ink);
      text-decoration: none;
    }

    .copy {
      float: right;
      background: var(--accent);
      color: white;
      border: none;
      border-radius: 8px;
    }

    .link {
      background: none;
      border: none;
      color: var(--accent);
      font-weight: 600;
    }

    .tasks {
      list-style: none;
      padding: 0;
      display: grid;
      gap: 10px;
    }

    .task form {
      display: flex;
      gap: 12px;
      align-items: center;
    }

    .check {
      width: 24px;
      height: 24px;
      border-radius: 6px;
      border: 2px solid var(--accent);
      background: transparent;
      color: var(--ink);
      padding: 0;
    }

    .task.done span {
      text-decoration: line-through;
      color: var(--muted);
    }

    .notice {
      background: rgba(35, 55, 241, 0.15);
      border-radius: 12px;
      padding: 12px 16px;
    }

    .celebrate {
      color: var(--lime);
      font-weight: 600;
    }

    .flag {
      background: rgba(239, 68, 68, 0.15);
      border: 1px solid rgba(239, 68, 68, 0.2);
      border-radius: 16px;
      padding: 16px;
    }

    .quote, .trust {
      border-left: 4px solid var(--accent);
      padding: 12px 16px;
    }

    .boosters {
      list-style: none;
      padding: 0;
      display: grid;
      gap: 20px;
    }

    .boosters li {
      display: flex;
      gap: 20px;
    }

    .step {
      font-size: 2rem;
      font-weight: 600;
      color: var(--accent);
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th, td {
      text-align: left;
      padding: 14px;
      border-top: 1px solid var(--border);
      vertical-align: top;
    }

    .toast {
      position: fixed;
      right: 24px;
      bottom: 24px;
      background: var(--accent);
      color: white;
      border-radius: 999px;
      padding: 8px 16px;
    }
  </style>
</head>
<body>
{{BODY}}
  <script>
    const toastEl = document.getElementById('toast');
    let toastTimer = null;

    const showToast = (message) => {
      if (!toastEl) {
        return;
      }
      toastEl.textContent = message;
      toastEl.hidden = false;
      clearTimeout(toastTimer);
      toastTimer = setTimeout(() => {
        toastEl.hidden = true;
      }, 2000);
    };

    document.querySelectorAll('[data-copy]').forEach((button) => {
      button.addEventListener('click', async () => {
        try {
          await navigator.clipboard.writeText(button.dataset.copy);
          showToast('Copied!');
        } catch (err) {
          showToast('Copy failed - please try again');
        }
      });
    });

    if (new URLSearchParams(window.location.search).has('new_week')) {
      window.history.replaceState(null, '', window.location.pathname + window.location.hash);
    }

    document.querySelectorAll('[data-dismiss]').forEach((button) => {
      button.addEventListener('click', () => {
        const target = document.getElementById(button.dataset.dismiss);
        if (target) {
          target.remove();
        }
      });
    });
  </script>
</body>
</html>
"#;

use crate::models::{FilterQuery, ItemCard, ItemKind};
use crate::render::{Dashboard, matches_filter};

pub fn render_index(date: &str, dashboard: &Dashboard, filter: &FilterQuery) -> String {
    let remaining_state = if dashboard.over_limit { "danger" } else { "normal" };
    INDEX_HTML
        .replace("{{DATE}}", date)
        .replace("{{LIMIT}}", &dashboard.calorie_limit.to_string())
        .replace("{{TOTAL}}", &dashboard.total_calories.to_string())
        .replace("{{CONSUMED}}", &dashboard.consumed.to_string())
        .replace("{{BURNED}}", &dashboard.burned.to_string())
        .replace("{{REMAINING}}", &dashboard.remaining.to_string())
        .replace("{{REMAINING_STATE}}", remaining_state)
        .replace("{{PROGRESS}}", &format!("{:.2}", dashboard.progress_percent))
        .replace("{{MEAL_FILTER}}", &escape_html(&filter.meal_filter))
        .replace("{{WORKOUT_FILTER}}", &escape_html(&filter.workout_filter))
        .replace(
            "{{MEAL_ITEMS}}",
            &render_cards(ItemKind::Meal, &dashboard.meals, &filter.meal_filter),
        )
        .replace(
            "{{WORKOUT_ITEMS}}",
            &render_cards(ItemKind::Workout, &dashboard.workouts, &filter.workout_filter),
        )
}

fn render_cards(kind: ItemKind, cards: &[ItemCard], query: &str) -> String {
    cards
        .iter()
        .map(|card| render_card(kind, card, matches_filter(&card.name, query)))
        .collect()
}

fn render_card(kind: ItemKind, card: &ItemCard, visible: bool) -> String {
    let id = escape_html(&card.id);
    format!(
        r#"<div class="item-card {kind}" data-id="{id}"{hidden}>
        <h4 class="item-name">{name}</h4>
        <span class="item-calories">{calories}</span>
        <form method="post" action="/{kind}s/{id}/delete">
          <button class="delete" type="submit" aria-label="Delete">&times;</button>
        </form>
      </div>
      "#,
        hidden = if visible { "" } else { " hidden" },
        name = escape_html(&card.name),
        calories = card.calories,
    )
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            // keeps user text from forming template placeholders
            '{' => escaped.push_str("&#123;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Calorie Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f3f6ec;
      --bg-2: #cfe3b4;
      --ink: #2b2a28;
      --accent: #599f3d;
      --accent-2: #2f4858;
      --danger: #dc3545;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e8f2da 60%, #f6f8f1 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: flex-end;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    h2 {
      margin: 0;
      font-size: 1.3rem;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat.danger {
      background: var(--danger);
      border-color: var(--danger);
    }

    .stat.danger .label,
    .stat.danger .value {
      color: white;
    }

    .progress {
      height: 18px;
      border-radius: 999px;
      background: rgba(47, 72, 88, 0.1);
      overflow: hidden;
    }

    .progress-bar {
      height: 100%;
      background: var(--accent);
      transition: width 200ms ease, background 200ms ease;
    }

    .progress-bar.danger {
      background: rgba(220, 53, 69, 0.9);
    }

    .columns {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
      gap: 24px;
    }

    .column {
      display: grid;
      gap: 14px;
      align-content: start;
    }

    details {
      background: white;
      border-radius: 18px;
      padding: 12px 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    summary {
      cursor: pointer;
      font-weight: 600;
    }

    form.entry {
      display: grid;
      gap: 10px;
      margin-top: 12px;
    }

    input {
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 12px;
      padding: 10px 12px;
      font: inherit;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent-2);
      color: white;
    }

    button:active {
      transform: scale(0.98);
    }

    .item-card {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
      background: white;
      border-radius: 16px;
      padding: 12px 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .item-card[hidden] {
      display: none;
    }

    .item-card h4 {
      margin: 0;
      flex: 1;
    }

    .item-calories {
      font-size: 1.4rem;
      font-weight: 600;
      color: white;
      border-radius: 10px;
      padding: 2px 14px;
      background: var(--accent-2);
    }

    .item-card.workout .item-calories {
      background: #8b857d;
    }

    .item-card form {
      margin: 0;
    }

    button.delete {
      background: var(--danger);
      padding: 4px 12px;
    }

    .reset {
      justify-self: end;
      background: transparent;
      color: var(--danger);
      border: 1px solid var(--danger);
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Calorie Tracker</h1>
        <p class="subtitle">Log meals and workouts against your daily limit.</p>
      </div>
      <span class="subtitle" id="date">{{DATE}}</span>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Daily limit</span>
        <span id="calories-limit" class="value">{{LIMIT}}</span>
      </div>
      <div class="stat">
        <span class="label">Gain / loss</span>
        <span id="calories-total" class="value">{{TOTAL}}</span>
      </div>
      <div class="stat">
        <span class="label">Consumed</span>
        <span id="calories-consumed" class="value">{{CONSUMED}}</span>
      </div>
      <div class="stat">
        <span class="label">Burned</span>
        <span id="calories-burned" class="value">{{BURNED}}</span>
      </div>
      <div class="stat {{REMAINING_STATE}}" id="remaining-box">
        <span class="label">Remaining</span>
        <span id="calories-remaining" class="value">{{REMAINING}}</span>
      </div>
    </section>

    <div class="progress">
      <div id="calorie-progress" class="progress-bar {{REMAINING_STATE}}" style="width: {{PROGRESS}}%"></div>
    </div>

    <details id="collapse-limit">
      <summary>Set daily limit</summary>
      <form class="entry" id="limit-form" method="post" action="/limit">
        <input id="limit" name="limit" type="number" step="any" placeholder="Daily calorie limit" />
        <button type="submit">Save limit</button>
      </form>
    </details>

    <section class="columns">
      <div class="column">
        <h2>Meals / Food</h2>
        <details id="collapse-meal">
          <summary>Add meal</summary>
          <form class="entry" id="meal-form" method="post" action="/meals">
            <input id="meal-name" name="name" type="text" placeholder="Meal name" />
            <input id="meal-calories" name="calories" type="number" step="any" placeholder="Calories" />
            <button type="submit">Add meal</button>
          </form>
        </details>
        <input id="filter-meals" class="filter" type="text" placeholder="Filter meals" value="{{MEAL_FILTER}}" />
        <div id="meal-items" data-type="meal">
      {{MEAL_ITEMS}}</div>
      </div>

      <div class="column">
        <h2>Workouts</h2>
        <details id="collapse-workout">
          <summary>Add workout</summary>
          <form class="entry" id="workout-form" method="post" action="/workouts">
            <input id="workout-name" name="name" type="text" placeholder="Workout name" />
            <input id="workout-calories" name="calories" type="number" step="any" placeholder="Calories" />
            <button type="submit">Add workout</button>
          </form>
        </details>
        <input id="filter-workouts" class="filter" type="text" placeholder="Filter workouts" value="{{WORKOUT_FILTER}}" />
        <div id="workout-items" data-type="workout">
      {{WORKOUT_ITEMS}}</div>
      </div>
    </section>

    <form id="reset-form" method="post" action="/reset">
      <button class="reset" id="reset" type="submit">Reset day</button>
    </form>
  </main>

  <script>
    const byId = (id) => document.getElementById(id);
    const mealItems = byId('meal-items');
    const workoutItems = byId('workout-items');
    const filters = { meal: byId('filter-meals'), workout: byId('filter-workouts') };
    const lists = { meal: mealItems, workout: workoutItems };

    const matchesFilter = (name, query) => name.toLowerCase().includes(query.toLowerCase());

    const applyFilter = (type) => {
      const query = filters[type].value;
      lists[type].querySelectorAll('.item-card').forEach((card) => {
        const name = card.querySelector('.item-name').textContent;
        card.hidden = !matchesFilter(name, query);
      });
    };

    const buildCard = (type, item) => {
      const card = document.createElement('div');
      card.className = `item-card ${type}`;
      card.dataset.id = item.id;

      const name = document.createElement('h4');
      name.className = 'item-name';
      name.textContent = item.name;

      const calories = document.createElement('span');
      calories.className = 'item-calories';
      calories.textContent = item.calories;

      const form = document.createElement('form');
      form.method = 'post';
      form.action = `/${type}s/${encodeURIComponent(item.id)}/delete`;
      const button = document.createElement('button');
      button.className = 'delete';
      button.type = 'submit';
      button.setAttribute('aria-label', 'Delete');
      button.innerHTML = '&times;';
      form.appendChild(button);

      card.append(name, calories, form);
      return card;
    };

    const renderItems = (type, items) => {
      lists[type].replaceChildren(...items.map((item) => buildCard(type, item)));
      applyFilter(type);
    };

    const applyDashboard = (data) => {
      byId('date').textContent = data.date;
      byId('calories-limit').textContent = data.calorie_limit;
      byId('calories-total').textContent = data.total_calories;
      byId('calories-consumed').textContent = data.consumed;
      byId('calories-burned').textContent = data.burned;
      byId('calories-remaining').textContent = data.remaining;

      const state = data.over_limit ? 'danger' : 'normal';
      byId('remaining-box').className = `stat ${state}`;
      const progress = byId('calorie-progress');
      progress.className = `progress-bar ${state}`;
      progress.style.width = `${data.progress_percent}%`;

      renderItems('meal', data.meals);
      renderItems('workout', data.workouts);
    };

    const send = async (method, url, body) => {
      const options = { method, headers: {} };
      if (body !== undefined) {
        options.headers['content-type'] = 'application/json';
        options.body = JSON.stringify(body);
      }
      const res = await fetch(url, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      applyDashboard(await res.json());
    };

    const report = (err) => alert(err.message);

    byId('limit-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const input = byId('limit');
      send('POST', '/api/limit', { limit: input.value })
        .then(() => {
          input.value = '';
          byId('collapse-limit').open = false;
        })
        .catch(report);
    });

    ['meal', 'workout'].forEach((type) => {
      byId(`${type}-form`).addEventListener('submit', (event) => {
        event.preventDefault();
        const name = byId(`${type}-name`);
        const calories = byId(`${type}-calories`);
        send('POST', `/api/${type}s`, { name: name.value, calories: calories.value })
          .then(() => {
            name.value = '';
            calories.value = '';
            byId(`collapse-${type}`).open = false;
          })
          .catch(report);
      });

      lists[type].addEventListener('submit', (event) => {
        event.preventDefault();
        const card = event.target.closest('.item-card');
        if (!card) {
          return;
        }
        send('DELETE', `/api/${type}s/${encodeURIComponent(card.dataset.id)}`).catch(report);
      });

      filters[type].addEventListener('input', () => applyFilter(type));
    });

    byId('reset-form').addEventListener('submit', (event) => {
      event.preventDefault();
      send('POST', '/api/reset').catch(report);
    });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Meal, Workout};
    use crate::render::RenderPort;

    fn dashboard() -> Dashboard {
        let mut dashboard = Dashboard::new();
        dashboard.render_limit(2000);
        dashboard.render_total(300);
        dashboard.render_consumed(300);
        dashboard.render_remaining(1700, false);
        dashboard.render_progress(15.0);
        dashboard
    }

    #[test]
    fn index_shows_stats() {
        let html = render_index("2026-01-05", &dashboard(), &FilterQuery::default());
        assert!(html.contains(r#"<span id="calories-limit" class="value">2000</span>"#));
        assert!(html.contains(r#"<span id="calories-remaining" class="value">1700</span>"#));
        assert!(html.contains(r#"class="progress-bar normal" style="width: 15.00%""#));
        assert!(html.contains("2026-01-05"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn over_limit_uses_danger_state() {
        let mut dashboard = dashboard();
        dashboard.render_remaining(0, true);
        let html = render_index("2026-01-05", &dashboard, &FilterQuery::default());
        assert!(html.contains(r#"class="stat danger" id="remaining-box""#));
        assert!(html.contains(r#"class="progress-bar danger""#));
    }

    #[test]
    fn item_names_are_escaped() {
        let mut dashboard = dashboard();
        let meal = Meal::new("<b>Fish & {{LIMIT}}</b>", 400);
        dashboard.render_new_item(ItemKind::Meal, (&meal).into());

        let html = render_index("2026-01-05", &dashboard, &FilterQuery::default());
        assert!(html.contains("&lt;b&gt;Fish &amp; &#123;&#123;LIMIT}}&lt;/b&gt;"));
        assert!(html.contains(&format!(r#"action="/meals/{}/delete""#, meal.id)));
    }

    #[test]
    fn filter_hides_non_matching_cards() {
        let mut dashboard = dashboard();
        let eggs = Meal::new("Scrambled Eggs", 300);
        let toast = Meal::new("Toast", 120);
        let run = Workout::new("Run", 500);
        dashboard.render_new_item(ItemKind::Meal, (&eggs).into());
        dashboard.render_new_item(ItemKind::Meal, (&toast).into());
        dashboard.render_new_item(ItemKind::Workout, (&run).into());

        let filter = FilterQuery {
            meal_filter: "EGG".to_string(),
            workout_filter: String::new(),
        };
        let html = render_index("2026-01-05", &dashboard, &filter);

        assert!(html.contains(&format!(r#"data-id="{}">"#, eggs.id)));
        assert!(html.contains(&format!(r#"data-id="{}" hidden>"#, toast.id)));
        assert!(html.contains(&format!(r#"data-id="{}">"#, run.id)));
        assert!(html.contains(r#"value="EGG""#));
    }
}

#[cfg(test)]
pub const EXPORT_DATA: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0"
	xmlns:excerpt="http://wordpress.org/export/1.2/excerpt/"
	xmlns:content="http://purl.org/rss/1.0/modules/content/"
	xmlns:wfw="http://wellformedweb.org/CommentAPI/"
	xmlns:dc="http://purl.org/dc/elements/1.1/"
	xmlns:wp="http://wordpress.org/export/1.2/"
>
<channel>
	<title>Obras Sociais</title>
	<link>https://example.org</link>
	<description>Transformando vidas</description>
	<wp:wxr_version>1.2</wp:wxr_version>

	<wp:author>
		<wp:author_id>1</wp:author_id>
		<wp:author_login><![CDATA[maria]]></wp:author_login>
		<wp:author_display_name><![CDATA[Maria Silva]]></wp:author_display_name>
	</wp:author>
	<wp:author>
		<wp:author_id>2</wp:author_id>
		<wp:author_login><![CDATA[joao]]></wp:author_login>
		<wp:author_display_name><![CDATA[]]></wp:author_display_name>
	</wp:author>

	<wp:category>
		<wp:term_id>10</wp:term_id>
		<wp:category_nicename><![CDATA[eventos]]></wp:category_nicename>
		<wp:category_parent><![CDATA[]]></wp:category_parent>
		<wp:cat_name><![CDATA[Eventos]]></wp:cat_name>
	</wp:category>
	<wp:category>
		<wp:term_id>11</wp:term_id>
		<wp:category_nicename><![CDATA[a%c3%a7%c3%a3o]]></wp:category_nicename>
		<wp:cat_name><![CDATA[Ação Social]]></wp:cat_name>
	</wp:category>

	<item>
		<title>Festa Anual</title>
		<link>https://example.org/2025/03/festa-anual/</link>
		<dc:creator><![CDATA[maria]]></dc:creator>
		<content:encoded><![CDATA[<p>Venha para a <a href="https://example.org/festa">festa</a>!</p><script>track();</script>]]></content:encoded>
		<excerpt:encoded><![CDATA[]]></excerpt:encoded>
		<wp:post_id>100</wp:post_id>
		<wp:post_date><![CDATA[2025-03-15 10:00:00]]></wp:post_date>
		<wp:status><![CDATA[publish]]></wp:status>
		<wp:post_name><![CDATA[festa-anual]]></wp:post_name>
		<wp:post_type><![CDATA[post]]></wp:post_type>
		<category domain="category" nicename="eventos"><![CDATA[Eventos]]></category>
		<category domain="post_tag" nicename="festa"><![CDATA[festa]]></category>
		<category domain="category" nicename="geral"><![CDATA[Geral]]></category>
	</item>
	<item>
		<title>Doação de Enxovais</title>
		<dc:creator><![CDATA[joao]]></dc:creator>
		<content:encoded><![CDATA[<p>Foram doados +150 enxovais.</p>]]></content:encoded>
		<wp:post_id>101</wp:post_id>
		<wp:post_date><![CDATA[2024-11-02 09:30:00]]></wp:post_date>
		<wp:status><![CDATA[publish]]></wp:status>
		<wp:post_name><![CDATA[]]></wp:post_name>
		<wp:post_type><![CDATA[post]]></wp:post_type>
		<category domain="post_tag" nicename="enxoval"><![CDATA[enxoval]]></category>
		<category domain="category" nicename="a%c3%a7%c3%a3o"><![CDATA[Ação Social]]></category>
	</item>
	<item>
		<title>Educação</title>
		<dc:creator><![CDATA[maria]]></dc:creator>
		<content:encoded><![CDATA[<style>.x { color: red; }</style><p>Escola com +60 alunos.</p>]]></content:encoded>
		<wp:post_id>102</wp:post_id>
		<wp:post_date><![CDATA[2025-03-01 08:00:00]]></wp:post_date>
		<wp:status><![CDATA[publish]]></wp:status>
		<wp:post_name><![CDATA[educa%c3%a7%c3%a3o]]></wp:post_name>
		<wp:post_type><![CDATA[post]]></wp:post_type>
		<category domain="category" nicename="eventos"><![CDATA[Eventos]]></category>
	</item>
	<item>
		<wp:post_id>103</wp:post_id>
		<wp:status><![CDATA[publish]]></wp:status>
		<wp:post_type><![CDATA[post]]></wp:post_type>
	</item>
	<item>
		<title>Rascunho</title>
		<wp:post_id>104</wp:post_id>
		<wp:status><![CDATA[draft]]></wp:status>
		<wp:post_type><![CDATA[post]]></wp:post_type>
	</item>
	<item>
		<title>Contato</title>
		<dc:creator><![CDATA[maria]]></dc:creator>
		<content:encoded><![CDATA[<p>Fale conosco.</p>]]></content:encoded>
		<wp:post_id>200</wp:post_id>
		<wp:post_date><![CDATA[2023-01-10 12:00:00]]></wp:post_date>
		<wp:status><![CDATA[publish]]></wp:status>
		<wp:post_name><![CDATA[contato]]></wp:post_name>
		<wp:post_type><![CDATA[page]]></wp:post_type>
	</item>
	<item>
		<title>Interna</title>
		<wp:post_id>201</wp:post_id>
		<wp:status><![CDATA[private]]></wp:status>
		<wp:post_type><![CDATA[page]]></wp:post_type>
	</item>
	<item>
		<title>logo.png</title>
		<wp:post_id>300</wp:post_id>
		<wp:status><![CDATA[inherit]]></wp:status>
		<wp:post_type><![CDATA[attachment]]></wp:post_type>
	</item>
	<item>
		<title>Menu</title>
		<wp:post_id>301</wp:post_id>
		<wp:status><![CDATA[publish]]></wp:status>
		<wp:post_type><![CDATA[nav_menu_item]]></wp:post_type>
	</item>
	<item>
		<title>Sem tipo</title>
		<wp:post_id>302</wp:post_id>
		<wp:status><![CDATA[publish]]></wp:status>
	</item>
</channel>
</rss>
"#;

#[cfg(test)]
pub const SINGLE_POST_EXPORT: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0"
	xmlns:content="http://purl.org/rss/1.0/modules/content/"
	xmlns:dc="http://purl.org/dc/elements/1.1/"
	xmlns:wp="http://wordpress.org/export/1.2/">
<channel>
	<title>Obras Sociais</title>
	<link>https://example.org</link>
	<item>
		<title>Festa Anual</title>
		<dc:creator><![CDATA[maria]]></dc:creator>
		<content:encoded><![CDATA[<p>Todos convidados.</p>]]></content:encoded>
		<wp:post_id>1</wp:post_id>
		<wp:post_date><![CDATA[2025-03-15 18:00:00]]></wp:post_date>
		<wp:status><![CDATA[publish]]></wp:status>
		<wp:post_name><![CDATA[festa-anual]]></wp:post_name>
		<wp:post_type><![CDATA[post]]></wp:post_type>
		<category domain="category" nicename="eventos"><![CDATA[Eventos]]></category>
		<category domain="category" nicename="geral"><![CDATA[Geral]]></category>
	</item>
</channel>
</rss>
"#;

#[cfg(test)]
pub const EMPTY_EXPORT: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0" xmlns:wp="http://wordpress.org/export/1.2/">
<channel>
	<title>Obras Sociais</title>
	<item>
		<title>Rascunho</title>
		<wp:status><![CDATA[draft]]></wp:status>
		<wp:post_type><![CDATA[post]]></wp:post_type>
	</item>
</channel>
</rss>
"#;
